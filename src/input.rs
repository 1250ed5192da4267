use std::collections::HashSet;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixel scroll deltas are divided by this to approximate wheel "lines".
const PIXELS_PER_LINE: f32 = 120.0;

/// Tracks keyboard, cursor, and scroll state between frames.
///
/// Cursor deltas are computed from successive absolute positions. The first
/// sample after creation or [`reset_cursor_tracking`](Self::reset_cursor_tracking)
/// only records the position, so re-entering the window does not produce a jump.
///
/// Raw device motion is tracked separately in [`motion_delta`](Self::motion_delta).
/// It keeps flowing while the cursor is grabbed and pinned, so it is what drives look.
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    cursor_position: Vec2,
    cursor_delta: Vec2,
    first_cursor_sample: bool,
    motion_delta: Vec2,
    scroll_delta: Vec2,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            cursor_position: Vec2::ZERO,
            cursor_delta: Vec2::ZERO,
            first_cursor_sample: true,
            motion_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.cursor_delta = Vec2::ZERO;
        self.motion_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let d = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
                    }
                };
                self.scrolled(d);
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.reset_cursor_tracking();
            }
            _ => {}
        }
    }

    /// Process a device event. Only relative mouse motion is used.
    ///
    /// Callers forward these only while the cursor is captured.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.mouse_motion(Vec2::new(*dx as f32, *dy as f32));
        }
    }

    /// Record a key press. Auto-repeat presses do not count as new presses.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Record a new absolute cursor position in window coordinates.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if self.first_cursor_sample {
            self.cursor_position = position;
            self.first_cursor_sample = false;
        }
        self.cursor_delta += position - self.cursor_position;
        self.cursor_position = position;
    }

    /// Record relative pointer motion in device units.
    pub fn mouse_motion(&mut self, delta: Vec2) {
        self.motion_delta += delta;
    }

    pub fn scrolled(&mut self, delta: Vec2) {
        self.scroll_delta += delta;
    }

    /// Treat the next cursor sample as the first one again.
    pub fn reset_cursor_tracking(&mut self) {
        self.first_cursor_sample = true;
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Current cursor position in window coordinates.
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Cursor movement accumulated this frame.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Relative pointer motion accumulated this frame.
    pub fn motion_delta(&self) -> Vec2 {
        self.motion_delta
    }

    /// Scroll wheel delta this frame (in "lines").
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, TouchPhase};

    fn device_id() -> DeviceId {
        // SAFETY: only compared against other ids, never handed to the platform.
        unsafe { DeviceId::dummy() }
    }

    #[test]
    fn focus_loss_rearms_first_sample() {
        let mut input = Input::new();
        input.handle_event(&WindowEvent::CursorMoved {
            device_id: device_id(),
            position: PhysicalPosition::new(100.0, 100.0),
        });
        input.handle_event(&WindowEvent::Focused(false));
        input.handle_event(&WindowEvent::CursorMoved {
            device_id: device_id(),
            position: PhysicalPosition::new(600.0, 50.0),
        });
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
        assert_eq!(input.cursor_position(), Vec2::new(600.0, 50.0));
    }

    #[test]
    fn cursor_leaving_rearms_first_sample() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::new(10.0, 10.0));
        input.handle_event(&WindowEvent::CursorLeft {
            device_id: device_id(),
        });
        input.cursor_moved(Vec2::new(790.0, 10.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
    }

    #[test]
    fn pixel_scroll_converts_to_lines() {
        let mut input = Input::new();
        input.handle_event(&WindowEvent::MouseWheel {
            device_id: device_id(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 240.0)),
            phase: TouchPhase::Moved,
        });
        input.handle_event(&WindowEvent::MouseWheel {
            device_id: device_id(),
            delta: MouseScrollDelta::LineDelta(0.0, -1.0),
            phase: TouchPhase::Moved,
        });
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn device_motion_accumulates_apart_from_cursor() {
        let mut input = Input::new();
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (4.0, -2.0) });
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (6.0, 1.0) });
        assert_eq!(input.motion_delta(), Vec2::new(10.0, -1.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.begin_frame();
        assert_eq!(input.motion_delta(), Vec2::ZERO);
    }

    #[test]
    fn first_cursor_sample_has_no_delta() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::new(400.0, 300.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.cursor_moved(Vec2::new(410.0, 295.0));
        assert_eq!(input.cursor_delta(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn deltas_accumulate_until_frame_reset() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::ZERO);
        input.cursor_moved(Vec2::new(3.0, 1.0));
        input.cursor_moved(Vec2::new(5.0, -1.0));
        assert_eq!(input.cursor_delta(), Vec2::new(5.0, -1.0));

        input.begin_frame();
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
        assert_eq!(input.cursor_position(), Vec2::new(5.0, -1.0));
    }

    #[test]
    fn reset_suppresses_jump() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::new(10.0, 10.0));
        input.reset_cursor_tracking();
        input.cursor_moved(Vec2::new(900.0, 700.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
    }

    #[test]
    fn press_and_release_edges() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        assert!(input.key_down(KeyCode::KeyW));
        assert!(input.key_pressed(KeyCode::KeyW));

        input.begin_frame();
        input.press_key(KeyCode::KeyW);
        assert!(input.key_down(KeyCode::KeyW));
        assert!(!input.key_pressed(KeyCode::KeyW), "repeat is not a new press");

        input.release_key(KeyCode::KeyW);
        assert!(!input.key_down(KeyCode::KeyW));
        assert!(input.key_released(KeyCode::KeyW));

        input.begin_frame();
        assert!(!input.key_released(KeyCode::KeyW));
    }

    #[test]
    fn scroll_accumulates() {
        let mut input = Input::new();
        input.scrolled(Vec2::new(0.0, 1.0));
        input.scrolled(Vec2::new(0.0, 2.0));
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 3.0));
        input.begin_frame();
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }
}
