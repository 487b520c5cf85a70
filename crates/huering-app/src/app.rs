//! Core application state and lifecycle.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use huering_core::{CircularColor, PickerConfig, PickerEvent, Rgb, ScrollBlocker};
use huering_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use kurbo::Point;
use peniko::Color;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::ui::{render_ui, UiAction, UiState};

#[cfg(not(target_arch = "wasm32"))]
mod file_ops {
    /// Write the exported SVG next to the working directory.
    pub fn export_svg(svg: &str) {
        let path = std::path::Path::new("huering.svg");
        if let Err(e) = std::fs::write(path, svg) {
            log::error!("Failed to write SVG: {}", e);
        } else {
            log::info!("Exported SVG to: {:?}", path);
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod file_ops {
    /// Trigger a browser download of the exported SVG.
    pub fn export_svg(svg: &str) {
        if let Err(e) = crate::web::download_text("huering.svg", svg, "image/svg+xml") {
            log::error!("Failed to export SVG: {:?}", e);
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Configuration of both pickers at start-up.
    pub picker: PickerConfig,
    /// Top-left corner of the canvas picker, in logical pixels.
    pub picker_origin: Point,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "HueRing".to_string(),
            width: 960,
            height: 640,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            picker: PickerConfig::default(),
            picker_origin: Point::new(48.0, 48.0),
        }
    }
}

/// Build a picker that reports every change into `sink`.
fn build_picker(
    config: PickerConfig,
    sink: &Rc<Cell<Rgb>>,
) -> Result<CircularColor, huering_core::ConfigError> {
    let sink = sink.clone();
    Ok(CircularColor::new(config)?.with_on_change(move |color| sink.set(color)))
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    picker_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Pickers
    picker: CircularColor,
    preview: CircularColor,
    last_color: Rc<Cell<Rgb>>,
    scroll_blocker: Option<Rc<dyn ScrollBlocker>>,
    /// Last cursor position in physical pixels.
    cursor: PhysicalPosition<f64>,

    config: AppConfig,
}

impl AppState {
    /// Convert a physical window position into logical window pixels.
    fn window_point(&self, position: PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f64>(self.window.scale_factor());
        Point::new(logical.x, logical.y)
    }

    /// Feed a window-space event to the canvas picker, redrawing if the
    /// color moved.
    fn dispatch(&mut self, event: PickerEvent) {
        let event = event.relative_to(self.config.picker_origin);
        let was_dragging = self.picker.is_dragging();
        if self.picker.handle_event(event).is_some() {
            self.ui_state.last_color = self.last_color.get();
        }
        if self.picker.is_dragging() || was_dragging {
            self.window.request_redraw();
        }
    }

    /// Replace both pickers. Dropping the old ones releases their scroll
    /// listeners before the new ones register.
    fn apply_config(&mut self, config: PickerConfig) {
        let picker = build_picker(config.clone(), &self.last_color);
        let preview = build_picker(config.clone(), &self.last_color);
        match (picker, preview) {
            (Ok(picker), Ok(preview)) => {
                self.picker = picker;
                self.preview = preview;
                if let Some(blocker) = &self.scroll_blocker {
                    self.picker.mount(blocker.clone());
                    self.preview.mount(blocker.clone());
                }
                self.last_color.set(self.picker.color());
                self.ui_state.last_color = self.picker.color();
                self.config.picker = config;
                log::info!("Applied picker config: {:?}", self.config.picker);
            }
            (Err(e), _) | (_, Err(e)) => log::warn!("Config not applied: {}", e),
        }
    }

    fn render(&mut self, render_cx: &vello::util::RenderContext) -> Result<(), RendererError> {
        // Run egui and get any actions
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut deferred_action: Option<UiAction> = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            deferred_action = render_ui(ctx, &mut self.ui_state, &mut self.preview);
        });
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        match deferred_action {
            Some(UiAction::ApplyConfig(config)) => self.apply_config(config),
            Some(UiAction::ExportSvg) => {
                file_ops::export_svg(&huering_render::to_svg(&self.picker))
            }
            None => {}
        }

        let render_ctx = RenderContext::new(&self.picker)
            .with_origin(self.config.picker_origin)
            .with_scale_factor(self.window.scale_factor())
            .with_background(self.config.background_color);
        self.picker_renderer.build_scene(&render_ctx)?;
        let scene = self.picker_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(format!("{:?}", e)))?;

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color: self.picker_renderer.background_color(&render_ctx),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding Rgba8Unorm target;
        // the surface may be Bgra8Unorm, so render to an intermediate texture.
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

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
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
                        load: vello::wgpu::LoadOp::Load, // Keep Vello content
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
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
        Ok(())
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: std::cell::Cell<bool>,
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
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: std::cell::Cell::new(false),
        }
    }

    /// Run the application.
    pub async fn run(config: AppConfig) {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {}", e);
                return;
            }
        };
        let app = App::with_config(config);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            if let Err(e) = event_loop.run_app(&mut app) {
                log::error!("Event loop error: {}", e);
            }
        }
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let Some(render_cx) = self.render_cx.as_ref() else {
            log::error!("RenderContext not initialized");
            return;
        };
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = match vello::Renderer::new(device, RendererOptions::default()) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", RendererError::InitFailed(format!("{:?}", e)));
                return;
            }
        };

        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
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

        let last_color = Rc::new(Cell::new(Rgb::new(0, 0, 0)));
        let (mut picker, mut preview) = match (
            build_picker(self.config.picker.clone(), &last_color),
            build_picker(self.config.picker.clone(), &last_color),
        ) {
            (Ok(picker), Ok(preview)) => (picker, preview),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Invalid picker config: {}", e);
                return;
            }
        };
        last_color.set(picker.color());

        let scroll_blocker = platform_scroll_blocker();
        if let Some(blocker) = &scroll_blocker {
            picker.mount(blocker.clone());
            preview.mount(blocker.clone());
        }

        log::info!(
            "HueRing initialized - {}x{}, {} sectors",
            surface.config.width,
            surface.config.height,
            self.config.picker.number_of_sectors
        );

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            picker_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::new(&self.config.picker, picker.color()),
            picker,
            preview,
            last_color,
            scroll_blocker,
            cursor: PhysicalPosition::new(0.0, 0.0),
            config: self.config.clone(),
        });

        self.pending_window = None;
        window.request_redraw();
    }
}

/// Window-level scroll suppression for the current platform.
#[cfg(target_arch = "wasm32")]
fn platform_scroll_blocker() -> Option<Rc<dyn ScrollBlocker>> {
    crate::web::WebScrollBlocker::new().map(|blocker| Rc::new(blocker) as Rc<dyn ScrollBlocker>)
}

/// Native windows have no page to scroll.
#[cfg(not(target_arch = "wasm32"))]
fn platform_scroll_blocker() -> Option<Rc<dyn ScrollBlocker>> {
    None
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(crate::web::canvas_element(self.config.width, self.config.height))
        };

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

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self
                .render_cx
                .get_or_insert_with(vello::util::RenderContext::new);

            let surface = match pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            )) {
                Ok(surface) => surface,
                Err(e) => {
                    log::error!("Failed to create surface: {:?}", e);
                    event_loop.exit();
                    return;
                }
            };

            // The surface borrows the window, which AppState keeps alive alongside it.
            let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
            self.finish_init(window, surface);
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            self.pending_window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // On WASM, handle async initialization
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            if let Some(window) = self.pending_window.clone() {
                if !self.init_in_progress.get() {
                    self.init_in_progress.set(true);

                    let size = window.inner_size();
                    let width = size.width.max(1);
                    let height = size.height.max(1);

                    let self_ptr = self as *mut Self;
                    let window_clone = window.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        let mut render_cx = vello::util::RenderContext::new();
                        let present_mode = PresentMode::AutoVsync;
                        match render_cx
                            .create_surface(window_clone.clone(), width, height, present_mode)
                            .await
                        {
                            Ok(surface) => {
                                let surface: RenderSurface<'static> =
                                    unsafe { std::mem::transmute(surface) };
                                // SAFETY: WASM is single-threaded and the event loop
                                // keeps App alive.
                                let app = unsafe { &mut *self_ptr };
                                app.render_cx = Some(render_cx);
                                app.finish_init(window_clone, surface);
                            }
                            Err(e) => {
                                log::error!("Failed to create surface: {:?}", e);
                                let app = unsafe { &mut *self_ptr };
                                app.init_in_progress.set(false);
                            }
                        }
                    });
                }
                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        // The canvas picker only sees pointer input egui did not claim,
        // except releases, which must always end a drag.
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();

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
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                if let Err(e) = state.render(render_cx) {
                    log::warn!("Frame skipped: {}", e);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = position;
                if egui_wants_input && !state.picker.is_dragging() {
                    return;
                }
                let point = state.window_point(position);
                state.dispatch(PickerEvent::mouse_move(point));
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => {
                let point = state.window_point(state.cursor);
                match btn_state {
                    ElementState::Pressed => {
                        if !egui_wants_input {
                            state.dispatch(PickerEvent::mouse_down(point));
                        }
                    }
                    ElementState::Released => state.dispatch(PickerEvent::mouse_up(point)),
                }
            }

            WindowEvent::Touch(touch) => {
                let point = state.window_point(touch.location);
                match touch.phase {
                    TouchPhase::Started => {
                        if !egui_wants_input {
                            state.dispatch(PickerEvent::touch_start(point));
                        }
                    }
                    TouchPhase::Moved => state.dispatch(PickerEvent::touch_move(point)),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        state.dispatch(PickerEvent::touch_end(point))
                    }
                }
            }

            _ => {}
        }
    }
}
