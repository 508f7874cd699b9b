//! Generic moving entity shared by bats and the puck

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cap_length;

/// Position, velocity and damping for anything that slides on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBody {
    pub pos: Vec2,
    vel: Vec2,
    pub acc: Vec2,
    /// Fraction of velocity removed on every `step` call
    friction: f32,
    /// Speed ceiling enforced by `set_velocity`
    max_speed: f32,
}

impl MovingBody {
    pub fn new(pos: Vec2, friction: f32, max_speed: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&friction),
            "friction {friction} outside [0, 1]"
        );
        assert!(max_speed >= 0.0, "negative speed cap {max_speed}");
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            friction,
            max_speed,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Store a velocity, capped to this body's speed ceiling
    pub fn set_velocity(&mut self, v: Vec2) {
        self.vel = cap_length(v, self.max_speed);
    }

    /// Same as `set_velocity(velocity + dv)`, so every call re-applies the cap.
    ///
    /// Summing two key impulses therefore caps the intermediate result: a
    /// diagonal press ends up skewed toward the axis pressed second.
    pub fn add_velocity(&mut self, dv: Vec2) {
        self.set_velocity(self.vel + dv);
    }

    /// Semi-implicit Euler step
    ///
    /// Friction is a per-call ratio and does not scale with `dt`; displacement does.
    pub fn step(&mut self, dt: f32) {
        self.vel += self.acc * dt;
        self.vel *= 1.0 - self.friction;
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_velocity_caps() {
        let mut body = MovingBody::new(Vec2::ZERO, 0.0, 1.0);
        body.set_velocity(Vec2::new(0.0, -5.0));
        assert_eq!(body.velocity(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_add_velocity_recaps_each_call() {
        let mut body = MovingBody::new(Vec2::ZERO, 0.0, 0.5);
        body.add_velocity(Vec2::new(1.0, 0.0));
        assert_eq!(body.velocity(), Vec2::new(0.5, 0.0));
        body.add_velocity(Vec2::new(0.0, 1.0));
        let v = body.velocity();
        assert!((v.length() - 0.5).abs() < 1e-6);
        // Second key dominates
        assert!(v.y > v.x);
    }

    #[test]
    fn test_opposite_impulses_leave_second_key_ahead() {
        // First impulse is capped before the second one lands
        let mut body = MovingBody::new(Vec2::ZERO, 0.0, 0.6);
        body.add_velocity(Vec2::new(-1.0, 0.0));
        body.add_velocity(Vec2::new(1.0, 0.0));
        assert!((body.velocity() - Vec2::new(0.4, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_friction_is_per_call() {
        let mut a = MovingBody::new(Vec2::ZERO, 0.1, 10.0);
        let mut b = a.clone();
        a.set_velocity(Vec2::new(1.0, 0.0));
        b.set_velocity(Vec2::new(1.0, 0.0));
        a.step(1.0);
        b.step(100.0);
        // Same damping regardless of dt
        assert!((a.velocity().x - 0.9).abs() < 1e-6);
        assert!((b.velocity().x - 0.9).abs() < 1e-6);
        // Displacement scales with dt
        assert!((a.pos.x - 0.9).abs() < 1e-5);
        assert!((b.pos.x - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_acceleration_integrates_before_position() {
        let mut body = MovingBody::new(Vec2::ZERO, 0.0, 10.0);
        body.acc = Vec2::new(0.0, 2.0);
        body.step(0.5);
        assert!((body.velocity().y - 1.0).abs() < 1e-6);
        assert!((body.pos.y - 0.5).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_friction_out_of_range_panics() {
        let _ = MovingBody::new(Vec2::ZERO, 1.5, 1.0);
    }
}
