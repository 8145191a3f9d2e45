//! Constellation Background
//!
//! Drifting particles linked to their neighbours, with a typewriter title and
//! a few egui panels on top.

mod cli;
mod gui;
mod page;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::Parser;
use cli::Cli;
use constellation_canvas::MeshCanvas;
use constellation_effects::{
    ContactError, ContactForm, FormTransport, Modal, ModalCatalog, Typewriter,
};
use constellation_field::{palette, AnimationLoop, FrameScheduler, FrameStats, ParticleField};
use constellation_wgpu::MeshRenderer;
use gui::{Gui, UiState};
use page::PageEffects;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

const DEFAULT_PHRASES: [&str; 3] = [
    "Constellation",
    "Particles that find each other",
    "Move the cursor to stir the field",
];

const CONTACT_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Frames are paced by winit redraw requests
struct WindowScheduler<'a>(&'a Window);

impl FrameScheduler for WindowScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Stand-in used when the binary is built without HTTP support
#[cfg(not(feature = "http"))]
struct Offline;

#[cfg(not(feature = "http"))]
impl FormTransport for Offline {
    fn post(&self, url: &str, _fields: &[(String, String)]) -> Result<(), ContactError> {
        Err(ContactError::Transport {
            url: url.to_string(),
            reason: "built without the `http` feature".to_string(),
        })
    }
}

fn contact_transport() -> Result<Box<dyn FormTransport>, ContactError> {
    #[cfg(feature = "http")]
    {
        let transport = constellation_effects::HttpTransport::new(Duration::from_secs(10))?;
        Ok(Box::new(transport))
    }
    #[cfg(not(feature = "http"))]
    {
        Ok(Box::new(Offline))
    }
}

fn logical_size(window: &Window) -> LogicalSize<f32> {
    window.inner_size().to_logical(window.scale_factor())
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh_renderer: MeshRenderer,
    canvas: MeshCanvas,
    gui: Gui,

    // Performance tracking
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open GPU device")?;

        // Colors are straight gamma-space values, so blend in a non-sRGB target
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mesh_renderer = MeshRenderer::new(&device, config.format);
        log::info!("✓ Renderer initialized ({:?})", config.format);

        let gui = Gui::new(&device, config.format, &window);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_renderer,
            canvas: MeshCanvas::new(),
            gui,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Returns `None` once the animation has been stopped
    fn render(
        &mut self,
        window: &Window,
        animation: &mut AnimationLoop,
        ui_state: &mut UiState,
        page: &mut PageEffects,
        now: Duration,
    ) -> Result<Option<FrameStats>, wgpu::SurfaceError> {
        let mut scheduler = WindowScheduler(window);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(err) => {
                // No surface this frame; keep the loop alive for the next one
                animation.frame(None::<&mut MeshCanvas>, &mut scheduler);
                return Err(err);
            }
        };

        let Some(stats) = animation.frame(Some(&mut self.canvas), &mut scheduler) else {
            return Ok(None);
        };

        // Track frame time
        let frame_start = Instant::now();
        let frame_time = (frame_start - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = frame_start;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;

        ui_state.fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };
        ui_state.frame_time = avg_frame_time;
        ui_state.particle_count = stats.particles;
        ui_state.link_count = stats.links;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let size = logical_size(window);
        self.mesh_renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            size.width,
            size.height,
            self.canvas.mesh(),
            palette::NIGHT,
        );

        self.gui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            ui_state,
            page,
            now,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(Some(stats))
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    animation: AnimationLoop,
    page: PageEffects,
    ui_state: UiState,
    transport: Box<dyn FormTransport>,
    started: Instant,
}

impl App {
    fn new(animation: AnimationLoop, page: PageEffects, transport: Box<dyn FormTransport>) -> Self {
        let params = animation.field().params();
        let ui_state = UiState {
            link_distance: params.link_distance,
            boundary: params.boundary,
            pointer: params.pointer,
            ..UiState::default()
        };

        Self {
            window: None,
            gpu_state: None,
            animation,
            page,
            ui_state,
            transport,
            started: Instant::now(),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Stopping after {} frames", self.animation.frames());
        self.animation.stop_handle().stop();
        self.page.shutdown();
        event_loop.exit();
    }

    /// Push panel edits into the field before it steps
    fn apply_controls(&mut self) {
        let field = self.animation.field_mut();
        let params = field.params_mut();
        params.link_distance = self.ui_state.link_distance;
        params.boundary = self.ui_state.boundary;
        params.pointer = self.ui_state.pointer;

        if std::mem::take(&mut self.ui_state.reinitialize_requested) {
            field.reinitialize();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let now = self.started.elapsed();
        self.page.update(now);
        window.set_title(&format!("✦ {}", self.page.typed_text()));
        self.apply_controls();

        let mut out_of_memory = false;
        match &mut self.gpu_state {
            Some(gpu_state) => {
                match gpu_state.render(
                    &window,
                    &mut self.animation,
                    &mut self.ui_state,
                    &mut self.page,
                    now,
                ) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => gpu_state.resize(window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }
            None => {
                self.animation
                    .frame(None::<&mut MeshCanvas>, &mut WindowScheduler(&window));
            }
        }

        if out_of_memory {
            log::error!("GPU out of memory");
            self.shutdown(event_loop);
            return;
        }

        if std::mem::take(&mut self.ui_state.submit_requested) {
            self.page.submit_contact(now, self.transport.as_ref());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Constellation")
            .with_inner_size(LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(err) => {
                log::error!("Failed to initialize GPU: {err:#}");
                event_loop.exit();
                return;
            }
        }

        let size = logical_size(&window);
        self.animation.field_mut().resize(size.width, size.height);
        self.page.start(self.started.elapsed());
        self.animation.start(&mut WindowScheduler(&window));
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Handle GUI events
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            if gpu_state.gui.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(window) = &self.window {
                    let size = logical_size(window);
                    log::info!("Resized to {}x{}", size.width, size.height);
                    self.animation.field_mut().resize(size.width, size.height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let position = position.to_logical::<f32>(window.scale_factor());
                    self.animation.field_mut().set_pointer(position.x, position.y);
                }
            }

            WindowEvent::CursorLeft { .. } => self.animation.field_mut().clear_pointer(),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v/-q
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    log::info!("Starting constellation...");

    let params = cli.field_params()?;

    let wait = Duration::from_millis(cli.wait_ms);
    let typewriter = match &cli.phrases {
        Some(json) => Typewriter::from_json(json, wait).context("invalid --phrases")?,
        None => Typewriter::new(DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect(), wait)?,
    };

    let modal = Modal::new(ModalCatalog::from_json(BUILTIN_CATALOG)?);

    let contact = cli.contact_endpoint.as_deref().map(|endpoint| {
        let mut form = ContactForm::new(endpoint);
        for name in CONTACT_FIELDS {
            form.set_field(name, "");
        }
        log::info!("✓ Contact form posts to {endpoint}");
        form
    });

    // The window is not open yet, so the field starts empty
    let animation = AnimationLoop::new(ParticleField::new(0.0, 0.0, params));
    let page = PageEffects::new(typewriter, modal, contact);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(animation, page, contact_transport()?);
    event_loop.run_app(&mut app)?;

    Ok(())
}
