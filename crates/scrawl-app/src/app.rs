//! Application state and lifecycle.

use crate::host::WindowHost;
use kurbo::Size;
use peniko::Color;
use scrawl_core::{
    DrawingOverlay, Modifiers, OverlayInput, OverlaySettings, ShortcutRegistry, StatusIndicator,
    WinitInput,
};
use scrawl_render::{RenderResult, RendererError, SurfaceGeometry};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use vello::util::{RenderContext, RenderSurface};
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

/// Shortcut that opens and closes the overlay.
pub const TOGGLE_HINT: &str = "Ctrl+Shift+D";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub settings: OverlaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "scrawl".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            settings: OverlaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Default configuration with overlay settings read from the user's
    /// config directory.
    pub fn load() -> Self {
        let settings = OverlaySettings::default_path()
            .map(|path| OverlaySettings::load_or_default(&path))
            .unwrap_or_default();
        Self {
            settings,
            ..Self::default()
        }
    }
}

/// Whether a key press toggles the overlay.
fn is_toggle_shortcut(key: &Key, modifiers: Modifiers) -> bool {
    let ctrl = modifiers.ctrl || modifiers.meta;
    matches!(key, Key::Character(c) if c.eq_ignore_ascii_case("d")) && ctrl && modifiers.shift
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

    // Overlay
    input: WinitInput,
    overlay: Option<DrawingOverlay<WindowHost>>,
    exit_requested: Rc<Cell<bool>>,
    layout_pending: bool,
}

impl AppState {
    fn geometry(&self) -> SurfaceGeometry {
        let size = Size::new(self.surface.config.width as f64, self.surface.config.height as f64);
        SurfaceGeometry::new(size).with_scale_factor(self.window.scale_factor())
    }

    fn toggle_overlay(&mut self, config: &AppConfig) {
        if self.overlay.is_some() {
            self.close_overlay(config);
        } else {
            self.open_overlay(config);
        }
    }

    fn open_overlay(&mut self, config: &AppConfig) {
        let host = WindowHost::new(self.window.clone(), self.geometry());

        let window = self.window.clone();
        let title = config.title.clone();
        let status: Box<dyn StatusIndicator> =
            Box::new(move |text: &str| window.set_title(&format!("{} - {}", title, text)));

        self.exit_requested.set(false);
        let exit = self.exit_requested.clone();

        match DrawingOverlay::create(host, config.settings, Some(status), move || exit.set(true)) {
            Ok(overlay) => {
                if !overlay.platform().is_mobile() {
                    log::info!("Overlay shortcuts:");
                    ShortcutRegistry::log_all();
                }
                self.overlay = Some(overlay);
                log::info!("Overlay open; press Escape or {} to close", TOGGLE_HINT);
            }
            Err(e) => log::error!("Failed to open overlay: {}", e),
        }
        self.window.request_redraw();
    }

    fn close_overlay(&mut self, config: &AppConfig) {
        // Dropping the overlay tears it down.
        if self.overlay.take().is_some() {
            self.window.set_title(&config.title);
            self.layout_pending = false;
            log::info!("Overlay closed");
        }
        self.window.request_redraw();
    }

    fn sync_geometry(&mut self) {
        let geometry = self.geometry();
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.host_mut().set_geometry(geometry);
            overlay.surface_mut().set_geometry(geometry);
        }
    }

    fn dispatch(&mut self, input: &OverlayInput, config: &AppConfig) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let outcome = overlay.handle(input);
        if outcome.is_consumed() {
            log::trace!("Overlay consumed {:?}", input);
        }
        if self.exit_requested.get() {
            self.close_overlay(config);
        }
        self.window.request_redraw();
    }

    fn render(&mut self, render_cx: &RenderContext, base_color: Color) {
        if let Some(overlay) = self.overlay.as_mut() {
            if let Some(frame) = overlay.host_mut().take_frame() {
                overlay.on_animation_frame(frame);
            }
        }

        // No cursor dot while input is handed back to the document.
        let scene = match self.overlay.as_ref() {
            Some(overlay) => {
                let cursor = overlay.cursor().filter(|_| overlay.host().is_interactive());
                overlay.surface().compose(cursor)
            }
            None => Scene::new(),
        };

        if let Err(e) = self.present(render_cx, &scene, base_color) {
            log::warn!("Failed to present frame: {}", e);
        }
    }

    fn present(&mut self, render_cx: &RenderContext, scene: &Scene, base_color: Color) -> RenderResult<()> {
        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello needs a storage-bindable Rgba8Unorm target; the surface
        // format may differ, so render off-screen and blit.
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
        let render_texture_view = render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        self.texture_blitter
            .copy(device, &mut encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: RenderContext,
}

impl App {
    /// Create a new application with configuration from the user's settings.
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: RenderContext::new(),
        }
    }

    /// Run the application.
    pub async fn run() -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new();
        event_loop.run_app(&mut app)
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> RenderResult<AppState> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| RendererError::InitFailed(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let surface = pollster::block_on(self.render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &self.render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        log::info!("scrawl initialized - {}x{}", surface.config.width, surface.config.height);
        log::info!("Press {} to start drawing", TOGGLE_HINT);

        window.request_redraw();

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            texture_blitter,
            input: WinitInput::new(),
            overlay: None,
            exit_requested: Rc::new(Cell::new(false)),
            layout_pending: false,
        })
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
        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to initialize: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                state.close_overlay(&self.config);
                event_loop.exit();
                return;
            }
            WindowEvent::RedrawRequested => {
                state.render(&self.render_cx, self.config.background_color);
                return;
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                self.render_cx
                    .resize_surface(&mut state.surface, size.width, size.height);
                state.sync_geometry();
            }
            WindowEvent::ScaleFactorChanged { .. } => state.sync_geometry(),
            // Window motion is the closest thing to a document reflow here.
            WindowEvent::Moved(_) => {
                if let Some(overlay) = state.overlay.as_mut() {
                    overlay.on_layout_change();
                    state.layout_pending = true;
                }
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. }
                if key.state.is_pressed() && is_toggle_shortcut(&key.logical_key, state.input.modifiers()) =>
            {
                state.toggle_overlay(&self.config);
                return;
            }
            _ => {}
        }

        if let Some(input) = state.input.translate(&event) {
            state.dispatch(&input, &self.config);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let deadline = state.overlay.as_mut().and_then(|overlay| overlay.poll());
        match deadline {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => {
                if state.layout_pending {
                    state.layout_pending = false;
                    state.window.request_redraw();
                }
                event_loop.set_control_flow(ControlFlow::Wait);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_shortcut_needs_ctrl_and_shift() {
        let d = Key::Character("D".into());
        let both = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::NONE
        };
        assert!(is_toggle_shortcut(&d, both));
        assert!(is_toggle_shortcut(&Key::Character("d".into()), both));
        assert!(!is_toggle_shortcut(&d, Modifiers::CTRL));
        assert!(!is_toggle_shortcut(&Key::Character("e".into()), both));
    }

    #[test]
    fn test_toggle_shortcut_accepts_cmd() {
        let cmd_shift = Modifiers {
            meta: true,
            shift: true,
            ..Modifiers::NONE
        };
        assert!(is_toggle_shortcut(&Key::Character("d".into()), cmd_shift));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "scrawl");
        assert!(!config.settings.pen_only_mode);
    }
}
