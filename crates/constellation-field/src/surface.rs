//! Drawing-surface contract
//!
//! The field treats its surface purely as an output sink: it never reads pixels
//! back, so a software raster, a GPU mesh or a command recorder all fit.

use glam::Vec2;

use crate::color::Color;

/// Axis-aligned rectangle in viewport pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Overlapping region, `None` when the two do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (max.x > min.x && max.y > min.y).then(|| Rect::new(min, max))
    }
}

/// A 2-D drawing context
pub trait RenderSurface {
    /// Erase everything inside `rect`
    fn clear_rect(&mut self, rect: Rect);

    /// Fill `rect` with a vertical gradient; a solid fill passes `top == bottom`
    fn fill_gradient(&mut self, rect: Rect, top: Color, bottom: Color);

    /// Filled disc (a full arc)
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color);

    /// Single stroked segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// One recorded surface call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Gradient {
        rect: Rect,
        top: Color,
        bottom: Color,
    },
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// Surface that keeps every call since the last clear
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl RenderSurface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_gradient(&mut self, rect: Rect, top: Color, bottom: Color) {
        self.commands.push(DrawCommand::Gradient { rect, top, bottom });
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::from_size(100.0, 100.0);
        let b = Rect::new(Vec2::new(50.0, 80.0), Vec2::new(150.0, 180.0));
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rect::new(Vec2::new(50.0, 80.0), Vec2::new(100.0, 100.0)));
        assert_eq!(overlap.area(), 1000.0);

        let c = Rect::new(Vec2::new(100.0, 0.0), Vec2::new(200.0, 10.0));
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn test_clear_resets_recording() {
        let mut surface = RecordingSurface::new();
        surface.fill_disc(Vec2::ONE, 1.0, Color::rgb(1.0, 0.0, 0.0));
        surface.clear_rect(Rect::from_size(10.0, 10.0));
        assert_eq!(surface.commands.len(), 1);
        assert_eq!(surface.discs().count(), 0);
    }
}
