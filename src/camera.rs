//! First-person camera state, orientation basis, and view transform.
//!
//! A [`Camera`] stores a position plus two Euler angles (yaw and pitch, in
//! degrees) and keeps an orthonormal `front`/`right`/`up` basis derived from
//! them. The basis is recomputed eagerly whenever the angles change, and the
//! angles themselves can only be changed through methods that do so, so the
//! basis can never go stale.
//!
//! # Conventions
//!
//! - Right-handed world, OpenGL style: the camera looks down `-Z` in camera space.
//! - `yaw = -90`, `pitch = 0` looks toward world `-Z`.
//! - Pitch is clamped to `[-89, 89]` degrees; yaw is left unbounded.
//!
//! # Example
//!
//! ```
//! use flycam::{Camera, Vec3};
//!
//! let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0);
//! camera.apply_look_delta(10.0, -5.0);
//!
//! let view = camera.view_matrix();
//! let proj = camera.projection(800.0 / 600.0);
//! let _view_proj = proj * view;
//! ```

use glam::{Mat4, Vec3, Vec4};

/// Pitch is kept strictly inside +-90 degrees to keep `front` away from `world_up`.
pub const PITCH_LIMIT: f32 = 89.0;
/// Smallest allowed vertical field of view, in degrees.
pub const MIN_FOV: f32 = 1.0;
/// Largest allowed vertical field of view, in degrees.
pub const MAX_FOV: f32 = 45.0;
/// Near clip plane used by [`Camera::projection`].
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane used by [`Camera::projection`].
pub const FAR_PLANE: f32 = 100.0;

const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;

/// A yaw/pitch fly camera with an eagerly maintained orthonormal basis.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    pub(crate) movement_speed: f32,
    mouse_sensitivity: f32,
    pub(crate) fov: f32,
}

impl Default for Camera {
    /// The starting pose every demo scene uses: three units back, looking down `-Z`.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0)
    }
}

impl Camera {
    /// Create a camera at `position` with the given up reference and angles (degrees).
    ///
    /// `pitch` is clamped into `[-89, 89]` and the basis is computed before returning.
    pub fn new(position: impl Into<Vec3>, world_up: impl Into<Vec3>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position: position.into(),
            world_up: world_up.into(),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            fov: MAX_FOV,
        };
        camera.update_basis();
        camera
    }

    /// Set the movement speed in world units per second. Negative values become 0.
    pub fn speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed.max(0.0);
        self
    }

    /// Set the pointer sensitivity (degrees per device unit).
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Set the vertical field of view in degrees, clamped to `[1, 45]`.
    pub fn fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.clamp(MIN_FOV, MAX_FOV);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees. Not wrapped, so it can drift past +-360.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within `[-89, 89]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction. Also the spotlight direction for flashlight-style lights.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    /// Vertical field of view in degrees.
    pub fn field_of_view(&self) -> f32 {
        self.fov
    }

    /// Move the camera without touching its orientation.
    pub fn set_position(&mut self, position: impl Into<Vec3>) {
        self.position = position.into();
    }

    pub(crate) fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Replace both angles at once (degrees). Pitch is clamped, then the basis is rebuilt.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Rotate by raw pointer deltas.
    ///
    /// Moving the pointer right turns right; moving it up (negative `dy` in
    /// window coordinates) looks up.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += self.mouse_sensitivity * dx;
        self.pitch -= self.mouse_sensitivity * dy;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    fn update_basis(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        // Re-derived from front rather than taken from world_up so it tilts with pitch.
        self.up = self.right.cross(self.front).normalize();
    }

    /// World-to-camera transform built straight from the basis.
    ///
    /// Equivalent to `Mat4::look_to_rh(position, front, up)`.
    pub fn view_matrix(&self) -> Mat4 {
        let (r, u, f, p) = (self.right, self.up, self.front, self.position);
        Mat4::from_cols(
            Vec4::new(r.x, u.x, -f.x, 0.0),
            Vec4::new(r.y, u.y, -f.y, 0.0),
            Vec4::new(r.z, u.z, -f.z, 0.0),
            Vec4::new(-p.dot(r), -p.dot(u), p.dot(f), 1.0),
        )
    }

    /// OpenGL perspective projection (depth in `[-1, 1]`) for the current field of view.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }

    /// Pack the camera into a uniform block for upload.
    pub fn uniforms(&self, aspect: f32) -> CameraUniforms {
        CameraUniforms {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection(aspect).to_cols_array_2d(),
            position: self.position.to_array(),
            fov: self.fov,
            front: self.front.to_array(),
            aspect,
        }
    }
}

/// Camera data laid out for a std140 uniform buffer.
///
/// # GLSL Declaration
///
/// ```glsl
/// layout(std140) uniform Camera {
///     mat4 view;
///     mat4 projection;
///     vec3 viewPos;
///     float fov;
///     vec3 front;
///     float aspect;
/// };
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// World-to-camera matrix, column-major.
    pub view: [[f32; 4]; 4],
    /// Camera-to-clip matrix, column-major.
    pub projection: [[f32; 4]; 4],
    /// Camera position in world space.
    pub position: [f32; 3],
    /// Vertical field of view in degrees. Fills the vec3 padding slot.
    pub fov: f32,
    /// View direction, used as the spotlight direction.
    pub front: [f32; 3],
    /// Aspect ratio (width / height).
    pub aspect: f32,
}
