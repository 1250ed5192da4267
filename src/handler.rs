//! Input dispatch: turns one frame of [`Input`] into camera and light updates.
//!
//! The [`Handler`] owns the per-window session state (cursor capture, the
//! selected light, toggles) but no camera. The camera and lights are passed in
//! each frame, so the same handler works with any windowing loop that can fill
//! an [`Input`].
//!
//! # Default controls
//!
//! | Key                 | Action                                      |
//! |---------------------|---------------------------------------------|
//! | W / S               | Fly forward / backward                      |
//! | A / D               | Strafe left / right                         |
//! | Space / Left Shift  | Fly up / down                               |
//! | N / M               | Speed +1 / -1                               |
//! | Z (held)            | Wireframe                                   |
//! | F                   | Toggle spotlight                            |
//! | Left Ctrl + move    | Move the selected light instead             |
//! | Left Ctrl + Up/Down | Select next / previous light                |
//! | Left Alt (held)     | Free the cursor                             |
//! | Escape              | Close                                       |

use std::time::Instant;

use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::camera::Camera;
use crate::input::Input;
use crate::lights::LightSet;
use crate::movement::Direction;

/// World units a held key moves the selected light per frame.
pub const LIGHT_NUDGE: f32 = 0.01;

/// Speed change per N/M press, in units per second.
const SPEED_STEP: f32 = 1.0;

/// Key assignments for every command the handler understands.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub speed_up: KeyCode,
    pub speed_down: KeyCode,
    pub wireframe: KeyCode,
    pub spotlight: KeyCode,
    /// Held to redirect movement keys to the selected light.
    pub light_modifier: KeyCode,
    pub next_light: KeyCode,
    pub previous_light: KeyCode,
    /// Held to free the cursor; released to capture it again.
    pub free_cursor: KeyCode,
    pub close: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            up: KeyCode::Space,
            down: KeyCode::ShiftLeft,
            speed_up: KeyCode::KeyN,
            speed_down: KeyCode::KeyM,
            wireframe: KeyCode::KeyZ,
            spotlight: KeyCode::KeyF,
            light_modifier: KeyCode::ControlLeft,
            next_light: KeyCode::ArrowUp,
            previous_light: KeyCode::ArrowDown,
            free_cursor: KeyCode::AltLeft,
            close: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// The key bound to a movement direction.
    pub fn key_for(&self, direction: Direction) -> KeyCode {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

/// Something only the windowing layer can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowRequest {
    Close,
    CaptureCursor,
    ReleaseCursor,
}

/// Measures the time between frames.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_frame: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { last_frame: start }
    }

    /// Seconds since the previous tick. Never negative.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = self.last_frame.max(now);
        dt
    }
}

/// Per-window session state for the fly camera controls.
#[derive(Clone, Debug)]
pub struct Handler {
    bindings: KeyBindings,
    cursor_captured: bool,
    selected_light: usize,
    spotlight_on: bool,
    wireframe: bool,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl Handler {
    /// Create a handler. The cursor is assumed captured until told otherwise.
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            cursor_captured: true,
            selected_light: 0,
            spotlight_on: false,
            wireframe: false,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Sync capture state with what the window actually did.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
    }

    /// Index of the light that Ctrl+movement edits.
    pub fn selected_light(&self) -> usize {
        self.selected_light
    }

    pub fn spotlight_on(&self) -> bool {
        self.spotlight_on
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Apply one frame of input.
    ///
    /// Returns the window-level actions the caller has to carry out. When the
    /// close key is held nothing else is processed.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        lights: &mut LightSet,
        input: &Input,
        dt: f32,
    ) -> Vec<WindowRequest> {
        if input.key_down(self.bindings.close) {
            return vec![WindowRequest::Close];
        }

        // Motion gathered while the cursor was free must not turn the camera,
        // even if this frame's commands recapture it.
        let look_enabled = self.cursor_captured;

        let mut requests = Vec::new();
        self.handle_commands(camera, lights.len(), input, &mut requests);

        if input.key_down(self.bindings.light_modifier) {
            self.nudge_selected_light(lights, input);
        } else {
            for direction in Direction::ALL {
                if input.key_down(self.bindings.key_for(direction)) {
                    camera.move_direction(direction, dt);
                }
            }
        }

        if look_enabled && self.cursor_captured {
            let delta = input.motion_delta();
            if delta != Vec2::ZERO {
                camera.apply_look_delta(delta.x, delta.y);
            }
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            camera.adjust_zoom(scroll);
        }

        requests
    }

    fn handle_commands(
        &mut self,
        camera: &mut Camera,
        light_count: usize,
        input: &Input,
        requests: &mut Vec<WindowRequest>,
    ) {
        let b = &self.bindings;
        let modifier_held = input.key_down(b.light_modifier);

        for key in [
            b.speed_up,
            b.speed_down,
            b.wireframe,
            b.spotlight,
            b.next_light,
            b.previous_light,
            b.free_cursor,
        ] {
            if !input.key_pressed(key) {
                continue;
            }
            if key == b.speed_up {
                camera.adjust_speed(SPEED_STEP);
                log::debug!("movement speed {}", camera.movement_speed());
            } else if key == b.speed_down {
                camera.adjust_speed(-SPEED_STEP);
                log::debug!("movement speed {}", camera.movement_speed());
            } else if key == b.wireframe {
                self.wireframe = true;
            } else if key == b.spotlight {
                self.spotlight_on = !self.spotlight_on;
                log::debug!("spotlight {}", if self.spotlight_on { "on" } else { "off" });
            } else if modifier_held {
                // With the modifier held, every remaining key is a light command.
                if key == b.next_light {
                    self.selected_light = next_index(self.selected_light, light_count);
                    log::debug!("selected light {}", self.selected_light);
                } else if key == b.previous_light {
                    self.selected_light = previous_index(self.selected_light, light_count);
                    log::debug!("selected light {}", self.selected_light);
                }
            } else if key == b.free_cursor {
                self.cursor_captured = false;
                requests.push(WindowRequest::ReleaseCursor);
            }
        }

        if input.key_released(b.wireframe) {
            self.wireframe = false;
        }
        if input.key_released(b.free_cursor) {
            self.cursor_captured = true;
            requests.push(WindowRequest::CaptureCursor);
        }
    }

    fn nudge_selected_light(&self, lights: &mut LightSet, input: &Input) {
        let Some(light) = lights.get_mut(self.selected_light) else {
            return;
        };
        let b = &self.bindings;
        let nudges = [
            (b.forward, Vec3::X),
            (b.backward, Vec3::NEG_X),
            (b.left, Vec3::Z),
            (b.right, Vec3::NEG_Z),
            (b.up, Vec3::Y),
            (b.down, Vec3::NEG_Y),
        ];
        for (key, axis) in nudges {
            if input.key_down(key) {
                light.position += axis * LIGHT_NUDGE;
            }
        }
    }
}

fn next_index(index: usize, count: usize) -> usize {
    if count == 0 {
        index
    } else {
        (index + 1) % count
    }
}

fn previous_index(index: usize, count: usize) -> usize {
    if count == 0 {
        index
    } else {
        (index % count + count - 1) % count
    }
}
