//! # constellation-wgpu
//!
//! Uploads the [`Mesh`] built by `constellation-canvas` and draws it in one
//! alpha-blended pass over a cleared target.

mod vertex;

pub use vertex::*;

use constellation_canvas::Mesh;
use constellation_field::Color;

/// Starting room, in elements, before the first regrowth
const INITIAL_VERTICES: u64 = 4096;
const INITIAL_INDICES: u64 = 8192;

/// Vertex/index buffer that is replaced by a larger one when outgrown
struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: wgpu::Buffer,
    size: u64,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages, size: u64) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        Self {
            label,
            usage,
            buffer: Self::allocate(device, label, usage, size),
            size,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &'static str,
        usage: wgpu::BufferUsages,
        size: u64,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let needed = bytes.len() as u64;
        if needed > self.size {
            self.size = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.usage, self.size);
            log::debug!("{} grown to {} bytes", self.label, self.size);
        }
        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

/// Draws pixel-space triangle meshes with straight-alpha blending
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    globals: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    vertices: GrowableBuffer,
    indices: GrowableBuffer,
    staging: Vec<WgpuVertex>,
}

impl MeshRenderer {
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Constellation Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        // screen size plus padding to a 16 byte uniform
        let globals = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Constellation Globals"),
            size: std::mem::size_of::<[f32; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Constellation Globals Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Constellation Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Constellation Pipeline Layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Constellation Mesh Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[WgpuVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            // Winding varies between discs and line quads
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_size = std::mem::size_of::<WgpuVertex>() as u64;
        let index_size = std::mem::size_of::<u32>() as u64;

        Self {
            pipeline,
            globals,
            globals_bind_group,
            vertices: GrowableBuffer::new(
                device,
                "Constellation Vertices",
                wgpu::BufferUsages::VERTEX,
                INITIAL_VERTICES * vertex_size,
            ),
            indices: GrowableBuffer::new(
                device,
                "Constellation Indices",
                wgpu::BufferUsages::INDEX,
                INITIAL_INDICES * index_size,
            ),
            staging: Vec::new(),
        }
    }

    /// Clear `target` to `clear_color` and draw `mesh` over it
    ///
    /// `screen_width`/`screen_height` are in the same units as the mesh
    /// coordinates, so a mesh in logical pixels fills a HiDPI target.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        screen_width: f32,
        screen_height: f32,
        mesh: &Mesh,
        clear_color: Color,
    ) {
        self.staging.clear();
        self.staging.extend(mesh.vertices.iter().map(WgpuVertex::from));

        self.vertices
            .upload(device, queue, bytemuck::cast_slice(&self.staging));
        self.indices
            .upload(device, queue, bytemuck::cast_slice(&mesh.indices));
        queue.write_buffer(
            &self.globals,
            0,
            bytemuck::cast_slice(&[screen_width, screen_height, 0.0, 0.0]),
        );

        let [r, g, b, a] = clear_color.to_array().map(f64::from);
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Constellation Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if mesh.is_empty() {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.globals_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
        pass.set_index_buffer(self.indices.buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..1);
    }
}
