//! # Flycam
//!
//! **A first-person fly camera for OpenGL-style scenes.**
//!
//! The camera keeps yaw and pitch in degrees, derives an orthonormal
//! `front`/`right`/`up` basis from them, and builds the view matrix directly
//! from that basis. A small winit shell feeds it keyboard, mouse and scroll
//! input so a demo only has to render.
//!
//! ## Quick Start
//!
//! ```no_run
//! use flycam::*;
//!
//! fn main() -> Result<(), AppError> {
//!     run(|ctx| {
//!         ctx.camera(Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0));
//!
//!         move |frame| {
//!             let view_proj = frame.projection() * frame.view();
//!             let _ = view_proj; // upload to the renderer
//!         }
//!     })
//! }
//! ```
//!
//! ## Using the camera on its own
//!
//! ```
//! use flycam::{Camera, Direction, Vec3};
//!
//! let mut camera = Camera::default();
//! camera.move_direction(Direction::Forward, 1.0);
//! camera.apply_look_delta(25.0, 0.0);
//! camera.adjust_zoom(5.0);
//!
//! assert!((camera.position() - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
//! assert_eq!(camera.field_of_view(), 40.0);
//! ```

mod app;
mod camera;
mod handler;
mod input;
mod lights;
mod movement;

pub use app::{AppConfig, AppError, Frame, SetupContext, run, run_with_config};
pub use camera::{
    Camera, CameraUniforms, FAR_PLANE, MAX_FOV, MIN_FOV, NEAR_PLANE, PITCH_LIMIT,
};
pub use handler::{FrameClock, Handler, KeyBindings, LIGHT_NUDGE, WindowRequest};
pub use input::Input;
pub use lights::{LightSet, PointLight};
pub use movement::Direction;

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};

// Re-export commonly used winit types for convenience
pub use winit::keyboard::KeyCode;
