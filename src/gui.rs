use std::time::Duration;

use constellation_field::{Boundary, PointerMode, Rect};
use egui::Context;
use egui_wgpu::{Renderer, RendererOptions};
use egui_winit::State;
use glam::Vec2;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

use crate::page::PageEffects;

pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub particle_count: usize,
    pub link_count: usize,
    pub link_distance: f32,
    pub boundary: Boundary,
    pub pointer: PointerMode,
    pub reinitialize_requested: bool,
    pub submit_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: 0.0,
            particle_count: 0,
            link_count: 0,
            link_distance: constellation_field::constants::LINK_DISTANCE,
            boundary: Boundary::default(),
            pointer: PointerMode::default(),
            reinitialize_requested: false,
            submit_requested: false,
        }
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
        page: &mut PageEffects,
        now: Duration,
    ) {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            ui(ctx, ui_state, page, now);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(
        Vec2::new(rect.min.x, rect.min.y),
        Vec2::new(rect.max.x, rect.max.y),
    )
}

fn ui(ctx: &Context, state: &mut UiState, page: &mut PageEffects, now: Duration) {
    // Diagnostics Panel (Top Left)
    egui::Window::new("Diagnostics")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.label(format!("FPS: {:.1}", state.fps));
            ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
            ui.label(format!("Particles: {}", state.particle_count));
            ui.label(format!("Links: {}", state.link_count));
        });

    // Statistics Panel (Top Right), counts up the first time it is half in view
    let reveal = page.stats_reveal(now);
    let stats = egui::Window::new("Statistics")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .collapsible(true)
        .default_open(false)
        .show(ctx, |ui| {
            ui.set_opacity(reveal.opacity);
            ui.add_space(reveal.offset);
            for (label, value) in page.counters() {
                ui.heading(value);
                ui.label(label);
                ui.separator();
            }
        });
    if let Some(response) = stats {
        if response.inner.is_some() {
            let panel = to_rect(response.response.rect);
            let viewport = to_rect(ctx.screen_rect());
            let (particles, links) = (state.particle_count, state.link_count);
            page.observe_stats(now, &panel, &viewport, || {
                vec![
                    ("Particles".to_string(), particles as u32),
                    ("Links".to_string(), links as u32),
                ]
            });
        }
    }

    // Field Controls (Bottom Left)
    let mut requested_entry = None;
    egui::Window::new("Field Controls")
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.heading("Links");
            ui.add(
                egui::Slider::new(&mut state.link_distance, 0.0..=400.0)
                    .text("Threshold (px)"),
            );

            ui.separator();
            ui.heading("Boundary");
            ui.horizontal(|ui| {
                ui.radio_value(&mut state.boundary, Boundary::Reflect, "Reflect");
                ui.radio_value(&mut state.boundary, Boundary::Respawn, "Respawn");
                ui.radio_value(&mut state.boundary, Boundary::Wrap, "Wrap");
            });

            ui.separator();
            ui.heading("Pointer");
            ui.horizontal(|ui| {
                ui.radio_value(&mut state.pointer, PointerMode::Off, "Off");
                ui.radio_value(&mut state.pointer, PointerMode::Repel, "Repel");
                ui.radio_value(&mut state.pointer, PointerMode::Attract, "Attract");
            });

            ui.separator();
            if ui.button("Respawn Particles").clicked() {
                state.reinitialize_requested = true;
            }

            if !page.modal.catalog().is_empty() {
                ui.separator();
                ui.heading("About");
                for key in page.modal.catalog().keys() {
                    if ui.button(key).clicked() {
                        requested_entry = Some(key.to_string());
                    }
                }
            }
        });

    if let Some(key) = requested_entry {
        // unknown keys are already logged
        let _ = page.modal.open(&key);
    }

    if let Some(content) = page.modal.content() {
        let mut close = false;
        egui::Window::new(content.title.as_str())
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(content.description.as_str());
                if !content.tags.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for tag in &content.tags {
                            ui.small(tag.as_str());
                        }
                    });
                }
                if let Some(link) = &content.link {
                    ui.hyperlink(link);
                }
                close = ui.button("Close").clicked();
            });
        if close {
            page.modal.close();
        }
    }

    // Contact (Bottom Right)
    if let Some(form) = &mut page.contact {
        egui::Window::new("Contact")
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .resizable(false)
            .collapsible(true)
            .default_open(false)
            .show(ctx, |ui| {
                for (name, label) in [("name", "Name"), ("email", "Email")] {
                    ui.label(label);
                    if let Some(value) = form.field_mut(name) {
                        ui.text_edit_singleline(value);
                    }
                }
                ui.label("Message");
                if let Some(value) = form.field_mut("message") {
                    ui.text_edit_multiline(value);
                }

                let send = ui.add_enabled(form.is_button_enabled(), egui::Button::new("Send"));
                if send.clicked() {
                    state.submit_requested = true;
                }
                if let Some(message) = form.message() {
                    ui.label(message);
                }
            });
    }
}
