//! Motion controller: directional movement, zoom, and speed changes.
//!
//! These are device-independent transitions on [`Camera`] state. The input
//! layer decides *when* to call them; this module only decides *what* they do.

use crate::camera::{Camera, MAX_FOV, MIN_FOV};

/// One of the six directions the camera can fly in, relative to its own basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

impl Camera {
    /// Move along a basis vector by `movement_speed * dt`.
    ///
    /// `dt` is the frame time in seconds. A zero `dt` means no motion.
    pub fn move_direction(&mut self, direction: Direction, dt: f32) {
        let axis = match direction {
            Direction::Forward => self.front(),
            Direction::Backward => -self.front(),
            Direction::Right => self.right(),
            Direction::Left => -self.right(),
            Direction::Up => self.up(),
            Direction::Down => -self.up(),
        };
        let distance = self.movement_speed * dt;
        self.translate(axis * distance);
    }

    /// Scroll-wheel zoom: a positive delta narrows the field of view.
    pub fn adjust_zoom(&mut self, scroll_delta: f32) {
        self.fov = (self.fov - scroll_delta).clamp(MIN_FOV, MAX_FOV);
    }

    /// Change movement speed, never dropping below zero.
    pub fn adjust_speed(&mut self, delta: f32) {
        self.movement_speed = (self.movement_speed + delta).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-5;

    #[test]
    fn forward_one_second() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0);
        camera.move_direction(Direction::Forward, 1.0);
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), EPS));
    }

    #[test]
    fn zero_dt_is_no_motion() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 17.0, -42.0);
        for direction in Direction::ALL {
            camera.move_direction(direction, 0.0);
        }
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn each_direction_uses_its_axis() {
        let cases = [
            (Direction::Forward, Vec3::NEG_Z),
            (Direction::Backward, Vec3::Z),
            (Direction::Left, Vec3::NEG_X),
            (Direction::Right, Vec3::X),
            (Direction::Up, Vec3::Y),
            (Direction::Down, Vec3::NEG_Y),
        ];
        for (direction, expected) in cases {
            let mut camera = Camera::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0).speed(2.0);
            camera.move_direction(direction, 0.5);
            assert!(
                camera.position().abs_diff_eq(expected, EPS),
                "{direction:?} moved to {}",
                camera.position()
            );
        }
    }

    #[test]
    fn up_follows_pitch() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::Y, -90.0, 45.0).speed(1.0);
        camera.move_direction(Direction::Up, 1.0);
        let p = camera.position();
        assert!(p.y > 0.0 && p.z > 0.0, "tilted up should lean back: {p}");
        assert!((p.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn opposite_moves_cancel() {
        let mut camera = Camera::new(Vec3::new(3.0, 1.0, -2.0), Vec3::Y, 63.0, 12.0);
        let start = camera.position();
        camera.move_direction(Direction::Left, 0.3);
        camera.move_direction(Direction::Right, 0.3);
        camera.move_direction(Direction::Up, 0.7);
        camera.move_direction(Direction::Down, 0.7);
        assert!(camera.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn zoom_clamps() {
        let mut camera = Camera::default();
        assert_eq!(camera.field_of_view(), 45.0);

        camera.adjust_zoom(-100.0);
        assert_eq!(camera.field_of_view(), 45.0);

        camera.adjust_zoom(100.0);
        assert_eq!(camera.field_of_view(), 1.0);

        camera.adjust_zoom(-3.0);
        assert_eq!(camera.field_of_view(), 4.0);
    }

    #[test]
    fn speed_never_negative() {
        let mut camera = Camera::default();
        assert_eq!(camera.movement_speed(), 2.5);

        camera.adjust_speed(-1000.0);
        assert_eq!(camera.movement_speed(), 0.0);

        camera.adjust_speed(1.0);
        camera.adjust_speed(1.0);
        assert_eq!(camera.movement_speed(), 2.0);
    }
}
