use constellation_canvas::Vertex;

/// GPU-side vertex: pixel position plus 8-bit straight RGBA, 12 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WgpuVertex {
    pub pos: [f32; 2],
    pub color: [u8; 4],
}

impl From<&Vertex> for WgpuVertex {
    fn from(vertex: &Vertex) -> Self {
        Self {
            pos: vertex.pos,
            color: vertex
                .color
                .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8),
        }
    }
}

impl WgpuVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Unorm8x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_field::Color;

    #[test]
    fn test_vertex_is_twelve_bytes() {
        assert_eq!(std::mem::size_of::<WgpuVertex>(), 12);
    }

    #[test]
    fn test_color_quantization() {
        let v = Vertex::new([1.0, 2.0], Color::new(0.0, 229.0 / 255.0, 1.0, 0.5));
        let w = WgpuVertex::from(&v);
        assert_eq!(w.pos, [1.0, 2.0]);
        assert_eq!(w.color, [0, 229, 255, 128]);
    }
}
