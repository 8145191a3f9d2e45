//! # constellation-canvas
//!
//! Geometry-only [`RenderSurface`](constellation_field::RenderSurface) that turns
//! discs, strokes and background fills into a triangle mesh. Uploading and
//! drawing the mesh is left to backend crates like `constellation-wgpu`.

mod mesh;
mod tessellate;

pub use mesh::*;
pub use tessellate::*;
