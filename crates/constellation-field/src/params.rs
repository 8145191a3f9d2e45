//! Field parameters for runtime tuning

use serde::Deserialize;

use crate::boundary::Boundary;
use crate::color::{palette, Color};
use crate::constants::*;
use crate::pointer::PointerMode;

/// How many particles a field holds
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleCount {
    /// Always exactly this many
    Fixed(usize),
    /// One particle per `stride` pixels of width, never more than `cap`
    PerWidth { stride: f32, cap: usize },
}

impl ParticleCount {
    pub fn resolve(self, width: f32) -> usize {
        match self {
            ParticleCount::Fixed(n) => n,
            ParticleCount::PerWidth { stride, cap } => {
                if stride <= 0.0 {
                    cap
                } else {
                    ((width.max(0.0) / stride) as usize).min(cap)
                }
            }
        }
    }
}

impl Default for ParticleCount {
    fn default() -> Self {
        ParticleCount::Fixed(DEFAULT_PARTICLE_COUNT)
    }
}

/// What gets painted under the particles after the clear
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Leave the cleared (transparent) surface as is
    #[default]
    None,
    Solid(Color),
    Gradient { top: Color, bottom: Color },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub count: ParticleCount,
    /// Velocity components are drawn from `[-speed, speed)`
    pub speed: f32,
    /// Radius range `[min, max)`
    pub radius: [f32; 2],
    /// Opacity range `[min, max)`; equal bounds give a constant alpha
    pub alpha: [f32; 2],

    /// Link threshold; a pair is linked when strictly closer than this
    pub link_distance: f32,
    pub link_width: f32,

    pub boundary: Boundary,

    pub pointer: PointerMode,
    pub pointer_radius: f32,
    pub pointer_strength: f32,

    pub particle_color: Color,
    pub link_color: Color,
    pub background: Background,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: ParticleCount::default(),
            speed: MAX_SPEED,
            radius: [MIN_RADIUS, MAX_RADIUS],
            alpha: [1.0, 1.0],
            link_distance: LINK_DISTANCE,
            link_width: LINK_WIDTH,
            boundary: Boundary::Reflect,
            pointer: PointerMode::Off,
            pointer_radius: POINTER_RADIUS,
            pointer_strength: POINTER_STRENGTH,
            particle_color: palette::CYAN,
            link_color: palette::CYAN,
            background: Background::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_count_ignores_width() {
        assert_eq!(ParticleCount::Fixed(80).resolve(0.0), 80);
        assert_eq!(ParticleCount::Fixed(80).resolve(4000.0), 80);
    }

    #[test]
    fn test_per_width_count_is_capped() {
        let count = ParticleCount::PerWidth {
            stride: WIDTH_STRIDE,
            cap: WIDTH_CAP,
        };
        assert_eq!(count.resolve(375.0), 37);
        assert_eq!(count.resolve(1920.0), WIDTH_CAP);
        assert_eq!(count.resolve(-10.0), 0);
    }

    #[test]
    fn test_defaults_match_theme() {
        let params = FieldParams::default();
        assert_eq!(params.count, ParticleCount::Fixed(80));
        assert_eq!(params.link_distance, 150.0);
        assert_eq!(params.radius, [1.0, 3.0]);
        assert_eq!(params.boundary, Boundary::Reflect);
    }
}
