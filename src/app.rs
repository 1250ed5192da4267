use std::time::Instant;

use glam::Mat4;
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use crate::camera::{Camera, CameraUniforms};
use crate::handler::{FrameClock, Handler, KeyBindings, WindowRequest};
use crate::input::Input;
use crate::lights::LightSet;

/// Errors that can stop the application.
#[derive(Debug)]
pub enum AppError {
    /// The event loop could not be created or failed while running.
    EventLoop(EventLoopError),
    /// The OS refused to create the window.
    Window(OsError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            AppError::Window(e) => write!(f, "Window creation failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
        }
    }
}

impl From<EventLoopError> for AppError {
    fn from(e: EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<OsError> for AppError {
    fn from(e: OsError) -> Self {
        AppError::Window(e)
    }
}

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Grab and hide the cursor as soon as the window opens.
    pub capture_cursor: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "flycam".to_string(),
            width: 800,
            height: 600,
            capture_cursor: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn capture_cursor(mut self, capture: bool) -> Self {
        self.capture_cursor = capture;
        self
    }
}

/// Context provided during app setup.
pub struct SetupContext<'a> {
    camera: &'a mut Camera,
    lights: &'a mut LightSet,
    bindings: &'a mut KeyBindings,
}

impl<'a> SetupContext<'a> {
    /// Replace the default camera (at `(0, 0, 3)` looking down `-Z`).
    pub fn camera(&mut self, camera: Camera) -> &mut Self {
        *self.camera = camera;
        self
    }

    /// Replace the default four-light set.
    pub fn lights(&mut self, lights: LightSet) -> &mut Self {
        *self.lights = lights;
        self
    }

    pub fn bindings(&mut self, bindings: KeyBindings) -> &mut Self {
        *self.bindings = bindings;
        self
    }

    /// The lights as configured so far, for in-place tweaks.
    pub fn lights_mut(&mut self) -> &mut LightSet {
        self.lights
    }
}

/// Per-frame state handed to the frame closure.
///
/// Input has already been applied to the camera and lights when the closure runs.
pub struct Frame<'a> {
    pub camera: &'a mut Camera,
    pub lights: &'a mut LightSet,
    pub input: &'a Input,
    /// Seconds since the window opened.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
    pub spotlight_on: bool,
    pub wireframe: bool,
    pub selected_light: usize,
    width: u32,
    height: u32,
}

impl Frame<'_> {
    /// Frames per second based on this frame's delta time.
    pub fn fps(&self) -> f32 {
        if self.dt > 0.0 { 1.0 / self.dt } else { 0.0 }
    }

    /// Window width in physical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Window height in physical pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn view(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection(&self) -> Mat4 {
        self.camera.projection(self.aspect())
    }

    pub fn uniforms(&self) -> CameraUniforms {
        self.camera.uniforms(self.aspect())
    }
}

/// Run a flycam application with setup and frame closures.
///
/// # Example
/// ```ignore
/// flycam::run(|ctx| {
///     ctx.camera(Camera::new(Vec3::new(0.0, 1.0, 5.0), Vec3::Y, -90.0, 0.0));
///
///     move |frame| {
///         let view_proj = frame.projection() * frame.view();
///         // hand view_proj to the renderer
///     }
/// })?;
/// ```
pub fn run<S, F>(setup: S) -> Result<(), AppError>
where
    S: FnOnce(&mut SetupContext) -> F,
    F: FnMut(&mut Frame) + 'static,
{
    run_with_config(AppConfig::default(), setup)
}

/// Run a flycam application with custom window configuration.
pub fn run_with_config<S, F>(config: AppConfig, setup: S) -> Result<(), AppError>
where
    S: FnOnce(&mut SetupContext) -> F,
    F: FnMut(&mut Frame) + 'static,
{
    let mut camera = Camera::default();
    let mut lights = LightSet::default();
    let mut bindings = KeyBindings::default();

    let frame_fn = {
        let mut ctx = SetupContext {
            camera: &mut camera,
            lights: &mut lights,
            bindings: &mut bindings,
        };
        setup(&mut ctx)
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = FlycamApp {
        config,
        window: None,
        camera,
        lights,
        handler: Handler::new(bindings),
        input: Input::new(),
        clock: FrameClock::new(),
        start_time: Instant::now(),
        frame_fn: Box::new(frame_fn),
        error: None,
    };

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct FlycamApp {
    config: AppConfig,
    window: Option<Window>,
    camera: Camera,
    lights: LightSet,
    handler: Handler,
    input: Input,
    clock: FrameClock,
    start_time: Instant,
    frame_fn: Box<dyn FnMut(&mut Frame)>,
    error: Option<AppError>,
}

impl ApplicationHandler for FlycamApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => window,
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "opened window '{}' ({}x{})",
            self.config.title,
            self.config.width,
            self.config.height
        );

        set_cursor_captured(&window, &mut self.handler, self.config.capture_cursor);

        self.start_time = Instant::now();
        self.clock = FrameClock::starting_at(self.start_time);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self.clock.tick(now);
                let time = now.duration_since(self.start_time).as_secs_f32();

                let requests = self
                    .handler
                    .update(&mut self.camera, &mut self.lights, &self.input, dt);
                for request in requests {
                    match request {
                        WindowRequest::Close => {
                            log::info!("close key pressed");
                            event_loop.exit();
                            return;
                        }
                        WindowRequest::CaptureCursor => {
                            set_cursor_captured(window, &mut self.handler, true)
                        }
                        WindowRequest::ReleaseCursor => {
                            set_cursor_captured(window, &mut self.handler, false)
                        }
                    }
                }

                let size = window.inner_size();
                let mut frame = Frame {
                    camera: &mut self.camera,
                    lights: &mut self.lights,
                    input: &self.input,
                    time,
                    dt,
                    spotlight_on: self.handler.spotlight_on(),
                    wireframe: self.handler.wireframe(),
                    selected_light: self.handler.selected_light(),
                    width: size.width,
                    height: size.height,
                };

                (self.frame_fn)(&mut frame);

                self.input.begin_frame();
                window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        // Raw motion keeps coming while the cursor is locked in place.
        if self.handler.cursor_captured() {
            self.input.handle_device_event(&event);
        }
    }
}

/// Grab or free the cursor, keeping the handler in sync with the outcome.
fn set_cursor_captured(window: &Window, handler: &mut Handler, captured: bool) {
    if !captured {
        if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("failed to release cursor: {e}");
        }
        window.set_cursor_visible(true);
        handler.set_cursor_captured(false);
        log::debug!("cursor released");
        return;
    }

    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match grabbed {
        Ok(()) => {
            window.set_cursor_visible(false);
            handler.set_cursor_captured(true);
            log::debug!("cursor captured");
        }
        Err(e) => {
            // Look stays disabled rather than spinning on an unconfined cursor.
            log::warn!("cursor grab failed, leaving it free: {e}");
            window.set_cursor_visible(true);
            handler.set_cursor_captured(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .title("Point Shadows")
            .size(1280, 720)
            .capture_cursor(false);
        assert_eq!(config.title, "Point Shadows");
        assert_eq!((config.width, config.height), (1280, 720));
        assert!(!config.capture_cursor);
        assert!(AppConfig::default().capture_cursor);
    }

    #[test]
    fn frame_matrices_use_window_aspect() {
        let mut camera = Camera::default();
        let mut lights = LightSet::default();
        let input = Input::new();
        let frame = Frame {
            camera: &mut camera,
            lights: &mut lights,
            input: &input,
            time: 0.0,
            dt: 0.02,
            spotlight_on: false,
            wireframe: false,
            selected_light: 0,
            width: 800,
            height: 600,
        };

        assert!((frame.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert!((frame.fps() - 50.0).abs() < 1e-3);
        assert_eq!(frame.projection(), frame.camera.projection(800.0 / 600.0));
        assert_eq!(frame.uniforms().view, frame.view().to_cols_array_2d());
    }

    #[test]
    fn zero_height_window_has_finite_aspect() {
        let mut camera = Camera::default();
        let mut lights = LightSet::empty();
        let input = Input::new();
        let frame = Frame {
            camera: &mut camera,
            lights: &mut lights,
            input: &input,
            time: 0.0,
            dt: 0.0,
            spotlight_on: false,
            wireframe: false,
            selected_light: 0,
            width: 640,
            height: 0,
        };
        assert_eq!(frame.aspect(), 640.0);
        assert_eq!(frame.fps(), 0.0);
    }

    #[test]
    fn error_display_and_source() {
        let err = AppError::from(EventLoopError::ExitFailure(3));
        assert!(err.to_string().starts_with("Event loop error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
