//! Core application state and lifecycle.

use blueprints_core::directory::HttpDirectory;
use blueprints_core::{BlueprintDirectory, LookupWorker, MemoryDirectory, ViewEvent, ViewState};
use blueprints_render::{
    DEFAULT_VIEWPORT, DrawingSurface, PathStyle, RenderResult, RendererError, VelloSurface,
    render_blueprint,
};
use kurbo::{Affine, Rect, RoundedRect, Size, Stroke};
use peniko::{Color, Fill};
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::ui::{CARD_RADIUS, ModalLayout, UiAction, UiState, render_ui};

/// Environment variable holding the directory service base URL.
pub const DIRECTORY_URL_ENV: &str = "BLUEPRINTS_DIRECTORY_URL";

/// Directory service the viewer talks to unless configured otherwise.
pub const DEFAULT_DIRECTORY_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Size of the blueprint drawing surface.
    pub canvas_size: Size,
    pub background_color: Color,
    /// Directory service base URL. `None` serves the built-in samples.
    pub directory_url: Option<String>,
    pub style: PathStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Blueprints".to_string(),
            width: 1024,
            height: 720,
            canvas_size: DEFAULT_VIEWPORT,
            background_color: Color::from_rgba8(245, 246, 248, 255),
            directory_url: Some(DEFAULT_DIRECTORY_URL.to_string()),
            style: PathStyle::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the environment.
    ///
    /// An empty `BLUEPRINTS_DIRECTORY_URL` selects the built-in samples.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(DIRECTORY_URL_ENV) {
            Ok(url) if url.trim().is_empty() => config.without_directory_url(),
            Ok(url) => config.with_directory_url(url),
            Err(_) => config,
        }
    }

    /// Use the directory service at `url`.
    pub fn with_directory_url(mut self, url: impl Into<String>) -> Self {
        self.directory_url = Some(url.into());
        self
    }

    /// Serve the built-in samples instead of a directory service.
    pub fn without_directory_url(mut self) -> Self {
        self.directory_url = None;
        self
    }

    /// Build the configured directory.
    ///
    /// An unusable URL is logged and replaced by the built-in samples so the
    /// viewer still starts.
    pub fn directory(&self) -> Arc<dyn BlueprintDirectory> {
        let Some(url) = self.directory_url.as_deref() else {
            log::info!("No directory URL configured, serving built-in samples");
            return Arc::new(MemoryDirectory::with_sample_data());
        };

        match HttpDirectory::new(url) {
            Ok(directory) => {
                log::info!("Using blueprint directory at {}", directory.base_url());
                Arc::new(directory)
            }
            Err(e) => {
                log::error!("Unusable directory URL {}: {}; serving built-in samples", url, e);
                Arc::new(MemoryDirectory::with_sample_data())
            }
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,
    /// Window scene, rebuilt every frame.
    scene: Scene,
    /// Drawing surface of the display dialog; only exists while it is shown.
    canvas: Option<VelloSurface>,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    view: ViewState,
    lookup: LookupWorker,
    config: AppConfig,
}

impl AppState {
    /// Replace the view state and draw if it asks for it.
    fn apply(&mut self, event: ViewEvent) {
        let update = self.view.apply(event);
        self.view = update.state;

        if !self.view.is_display_open() && self.canvas.take().is_some() {
            log::debug!("Display closed, dropping its surface");
        }
        if update.render {
            self.draw_selection();
        }
    }

    fn draw_selection(&mut self) {
        let (Some(canvas), Some(blueprint)) = (self.canvas.as_mut(), self.view.selected()) else {
            log::warn!("Render requested without a surface or selection");
            return;
        };
        render_blueprint(canvas, &blueprint.points, &self.config.style);
        log::info!("Drew blueprint {} ({} points)", blueprint.name, blueprint.len());
    }

    /// Apply finished lookups in arrival order.
    fn poll_lookups(&mut self) {
        for event in self.lookup.poll_events() {
            match &event.result {
                Ok(list) => log::info!("Lookup #{}: {} blueprints of {}", event.request_id, list.len(), event.author),
                Err(e) => log::info!("Lookup #{} for {}: {}", event.request_id, event.author, e),
            }
            self.apply(ViewEvent::LookupCompleted {
                author: event.author,
                result: event.result,
            });
        }
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::Lookup(author) => {
                let id = self.lookup.request(&author);
                log::info!("Lookup #{} for {}", id, author);
            }
            UiAction::Select(name) => self.apply(ViewEvent::Select(name)),
            UiAction::CloseDisplay => self.apply(ViewEvent::SurfaceClosed),
        }
    }

    /// Create the display surface the first frame the dialog is shown.
    fn ensure_canvas(&mut self) {
        if self.view.is_display_open() && self.canvas.is_none() {
            self.canvas = Some(VelloSurface::new(self.config.canvas_size));
            self.apply(ViewEvent::SurfaceReady);
        }
    }

    /// Window size in logical pixels.
    fn logical_size(&self) -> Size {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        Size::new(size.width, size.height)
    }

    fn modal_layout(&self) -> ModalLayout {
        ModalLayout::new(self.logical_size(), self.config.canvas_size)
    }

    /// Rebuild the window scene: dimmed backdrop, dialog card and the
    /// display surface when the dialog is open, nothing otherwise.
    fn build_scene(&mut self) {
        self.scene.reset();
        let Some(canvas) = self.canvas.as_ref() else {
            return;
        };

        let screen = self.logical_size().to_rect();
        let layout = ModalLayout::new(screen.size(), canvas.size());
        let dpi = Affine::scale(self.window.scale_factor());

        self.scene.fill(Fill::NonZero, dpi, Color::from_rgba8(0, 0, 0, 80), None, &screen);
        let card = RoundedRect::from_rect(layout.card, CARD_RADIUS);
        self.scene.fill(Fill::NonZero, dpi, Color::WHITE, None, &card);
        self.scene.append(
            canvas.scene(),
            Some(dpi * Affine::translate(layout.canvas.origin().to_vec2())),
        );
        let border: Rect = layout.canvas.inflate(0.5, 0.5);
        self.scene.stroke(&Stroke::new(1.0), dpi, Color::BLACK, None, &border);
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) -> RenderResult<()> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| RendererError::InitFailed("RenderContext not initialized".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("Vello renderer: {e:?}")))?;

        // Vello renders to Rgba8Unorm; the surface may want another format.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!("Blueprints initialized - {}x{}", surface.config.width, surface.config.height);

        let lookup = LookupWorker::new(self.config.directory());

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            texture_blitter,
            scene: Scene::new(),
            canvas: None,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            view: ViewState::new(),
            lookup,
            config: self.config.clone(),
        });

        window.request_redraw();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface = match pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        )) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{}", RendererError::Surface(format!("{e:?}")));
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.finish_init(window, surface) {
            log::error!("{}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        // egui sees every event; nothing else consumes input.
        let _ = state.egui_state.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                state.poll_lookups();

                // Run egui and get any actions
                let layout = state.modal_layout();
                let busy = state.lookup.is_busy();
                let egui_input = state.egui_state.take_egui_input(&state.window);
                let mut action: Option<UiAction> = None;
                let egui_output = state.egui_ctx.run(egui_input, |ctx| {
                    action = render_ui(ctx, &mut state.ui_state, &state.view, busy, &layout);
                });

                if let Some(action) = action {
                    state.handle_action(action);
                }
                state.ensure_canvas();

                state.egui_state.handle_platform_output(&state.window, egui_output.platform_output);
                let egui_primitives = state.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

                state.build_scene();

                // Render
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };

                let device_handle = &render_cx.devices[state.surface.dev_id];
                let device = &device_handle.device;
                let queue = &device_handle.queue;

                let surface_texture = match state.surface.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(e) => {
                        log::warn!("Failed to get surface texture: {:?}", e);
                        return;
                    }
                };

                let width = state.surface.config.width;
                let height = state.surface.config.height;

                let params = RenderParams {
                    base_color: state.config.background_color,
                    width,
                    height,
                    antialiasing_method: AaConfig::Area,
                };

                // Vello's compute shaders need a StorageBinding Rgba8Unorm target;
                // the result is blitted to the surface afterwards.
                let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
                    label: Some("vello render texture"),
                    size: vello::wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: vello::wgpu::TextureDimension::D2,
                    format: vello::wgpu::TextureFormat::Rgba8Unorm,
                    usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                        | vello::wgpu::TextureUsages::COPY_SRC
                        | vello::wgpu::TextureUsages::TEXTURE_BINDING,
                    view_formats: &[],
                });

                let render_texture_view =
                    render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

                if let Err(e) = state.vello_renderer.render_to_texture(
                    device,
                    queue,
                    &state.scene,
                    &render_texture_view,
                    &params,
                ) {
                    log::error!("{}", RendererError::RenderFailed(format!("{e:?}")));
                    return;
                }

                let surface_view =
                    surface_texture.texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

                {
                    let mut blit_encoder =
                        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                            label: Some("blit encoder"),
                        });
                    state
                        .texture_blitter
                        .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
                    queue.submit(std::iter::once(blit_encoder.finish()));
                }

                // Update egui textures
                for (id, image_delta) in &egui_output.textures_delta.set {
                    state.egui_renderer.update_texture(device, queue, *id, image_delta);
                }

                // Render egui on top
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [width, height],
                    pixels_per_point: egui_output.pixels_per_point,
                };

                {
                    let mut egui_encoder =
                        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                            label: Some("egui encoder"),
                        });

                    state.egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut egui_encoder,
                        &egui_primitives,
                        &screen_descriptor,
                    );

                    let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                        label: Some("egui render pass"),
                        color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                            view: &surface_view,
                            resolve_target: None,
                            ops: vello::wgpu::Operations {
                                load: vello::wgpu::LoadOp::Load,
                                store: vello::wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    // egui-wgpu wants a 'static render pass
                    let mut render_pass = render_pass.forget_lifetime();
                    state.egui_renderer.render(&mut render_pass, &egui_primitives, &screen_descriptor);
                    drop(render_pass);

                    queue.submit(std::iter::once(egui_encoder.finish()));
                }

                for id in &egui_output.textures_delta.free {
                    state.egui_renderer.free_texture(id);
                }
                surface_texture.present();

                // Redraw continuously; lookups are polled once per frame.
                state.window.request_redraw();
            }

            _ => {}
        }
    }
}
