//! Wind: a slow random horizontal push on the puck

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Wind state, also the indicator bar drawn above the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Where the indicator is drawn
    pub pos: Vec2,
    /// Signed strength in [-1, 1]; negative blows toward blue's goal
    rate: f32,
    max_magnitude: f32,
}

impl Wind {
    pub fn new(pos: Vec2, max_magnitude: f32) -> Self {
        assert!(max_magnitude >= 0.0, "negative wind magnitude {max_magnitude}");
        Self {
            pos,
            rate: 0.0,
            max_magnitude,
        }
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.clamp(-1.0, 1.0);
    }

    /// Draw a new rate uniformly from [-1, 1]
    pub fn reroll<R: Rng>(&mut self, rng: &mut R) {
        self.set_rate(rng.random_range(-1.0..=1.0));
    }

    /// Horizontal wind velocity, added to the puck once per second of play
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.rate * self.max_magnitude, 0.0)
    }

    /// Impulse for `delta_ms` of elapsed time
    pub fn impulse(&self, delta_ms: f32) -> Vec2 {
        self.velocity() * delta_ms / 1000.0
    }
}
