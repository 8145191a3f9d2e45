use std::f32::consts::TAU;

use constellation_field::{Color, Rect, RenderSurface};
use glam::Vec2;

use crate::mesh::{Mesh, Vertex};

/// Discs never use fewer segments than this
const MIN_DISC_SEGMENTS: u32 = 8;
const MAX_DISC_SEGMENTS: u32 = 64;

/// Strokes thinner than this are widened to it with alpha scaled down
const HAIRLINE_WIDTH: f32 = 1.0;

/// Render surface that tessellates every call into [`Mesh`] triangles
#[derive(Debug, Default)]
pub struct MeshCanvas {
    mesh: Mesh,
}

impl MeshCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Segment count for a disc of the given radius
    pub fn disc_segments(radius: f32) -> u32 {
        ((radius * 4.0).ceil() as u32).clamp(MIN_DISC_SEGMENTS, MAX_DISC_SEGMENTS)
    }

    fn push_quad(&mut self, corners: [Vec2; 4], colors: [Color; 4]) {
        let base = self.mesh.next_index();
        for (corner, color) in corners.into_iter().zip(colors) {
            self.mesh.vertices.push(Vertex::new(corner.to_array(), color));
        }
        self.mesh
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

impl RenderSurface for MeshCanvas {
    /// The mesh is rebuilt every frame and backends clear the target, so any
    /// clear simply drops the accumulated geometry
    fn clear_rect(&mut self, _rect: Rect) {
        self.mesh.clear();
    }

    fn fill_gradient(&mut self, rect: Rect, top: Color, bottom: Color) {
        if (top.a <= 0.0 && bottom.a <= 0.0) || rect.area() <= 0.0 {
            return;
        }
        let corners = [
            rect.min,
            Vec2::new(rect.max.x, rect.min.y),
            rect.max,
            Vec2::new(rect.min.x, rect.max.y),
        ];
        self.push_quad(corners, [top, top, bottom, bottom]);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        if color.a <= 0.0 || radius <= 0.0 {
            return;
        }

        let segments = Self::disc_segments(radius);
        let base = self.mesh.next_index();

        // Triangle fan around the center vertex
        self.mesh
            .vertices
            .push(Vertex::new(center.to_array(), color));
        for k in 0..segments {
            let angle = k as f32 / segments as f32 * TAU;
            let rim = center + Vec2::from_angle(angle) * radius;
            self.mesh.vertices.push(Vertex::new(rim.to_array(), color));
        }
        for k in 0..segments {
            let current = base + 1 + k;
            let next = base + 1 + (k + 1) % segments;
            self.mesh.indices.extend_from_slice(&[base, current, next]);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let delta = to - from;
        let length = delta.length();
        if color.a <= 0.0 || width <= 0.0 || length <= f32::EPSILON {
            return;
        }

        let (width, color) = if width < HAIRLINE_WIDTH {
            (HAIRLINE_WIDTH, color.with_alpha(color.a * width / HAIRLINE_WIDTH))
        } else {
            (width, color)
        };

        let normal = delta.perp() / length * (width * 0.5);
        let corners = [from + normal, from - normal, to - normal, to + normal];
        self.push_quad(corners, [color; 4]);
    }
}
