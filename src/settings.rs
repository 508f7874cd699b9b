//! Match tuning
//!
//! Defaults come from `consts`; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable physics and pacing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the wind RNG
    pub seed: u64,

    // === Pieces ===
    pub bat_radius: f32,
    pub puck_radius: f32,
    pub bat_friction: f32,
    pub puck_friction: f32,
    /// Speed ceilings in pixels per millisecond
    pub bat_max_speed: f32,
    pub puck_max_speed: f32,
    /// Velocity each held direction key adds to the active bat
    pub bat_key_impulse: f32,

    // === Collisions ===
    /// Share of the bat's normal velocity transferred to the puck on a hit
    pub bat_push: f32,
    /// Relative masses splitting de-penetration between two bodies
    pub bat_mass: f32,
    pub puck_mass: f32,

    // === Timing ===
    /// Physics slices per frame
    pub substeps: u32,
    /// Minimum frame duration
    pub frame_ms: f32,

    // === Wind ===
    pub wind_period_ms: u64,
    pub wind_max_magnitude: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,

            bat_radius: BAT_SIZE / 2.0,
            puck_radius: PUCK_SIZE / 2.0,
            bat_friction: 0.0,
            puck_friction: PUCK_FRICTION,
            bat_max_speed: BAT_MAX_SPEED,
            puck_max_speed: PUCK_MAX_SPEED,
            bat_key_impulse: BAT_KEY_IMPULSE,

            bat_push: BAT_PUSH,
            bat_mass: BAT_MASS,
            puck_mass: PUCK_MASS,

            substeps: SUBSTEPS,
            frame_ms: FRAME_MS,

            wind_period_ms: WIND_PERIOD_MS,
            wind_max_magnitude: WIND_MAX_MAGNITUDE,
        }
    }
}

impl Settings {
    /// Parse settings, filling anything missing from the defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Inverse-mass shares `(bat, puck)` of a bat/puck de-penetration
    pub fn bat_puck_shares(&self) -> (f32, f32) {
        let inv_bat = 1.0 / self.bat_mass;
        let inv_puck = 1.0 / self.puck_mass;
        let total = inv_bat + inv_puck;
        (inv_bat / total, inv_puck / total)
    }

    /// Duration of one physics slice for a frame of `delta_ms`
    pub fn substep_ms(&self, delta_ms: f32) -> f32 {
        delta_ms / self.substeps as f32
    }
}
