use constellation_field::Color;

/// Vertex with pixel position and straight RGBA color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(pos: [f32; 2], color: Color) -> Self {
        Self {
            pos,
            color: color.to_array(),
        }
    }
}

/// Indexed triangle list, rebuilt every frame
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry but keep the allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index the next vertex pushed will get
    pub(crate) fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }
}
