//! Air Hockey - a two-paddle table game with a gusty puck
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, wind, match loop)
//! - `renderer`: Rendering capability handed to the match each frame
//! - `platform`: Clock and keyboard abstractions
//! - `settings`: Data-driven tuning

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window size the board is laid out in
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Playing field, placed below the wind bar and score row
    pub const FIELD_LEFT: f32 = 0.0;
    pub const FIELD_TOP: f32 = 100.0;
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Goal mouth opening (vertical) and how far the net sits behind the goal line
    pub const GOAL_WIDTH: f32 = 240.0;
    pub const GOAL_DEPTH: f32 = 40.0;

    /// Sprite sizes (diameters)
    pub const BAT_SIZE: f32 = 80.0;
    pub const PUCK_SIZE: f32 = 50.0;

    /// Puck speed ceiling in pixels per millisecond
    pub const PUCK_MAX_SPEED: f32 = 1.0;
    /// Fraction of puck velocity lost on every move call
    pub const PUCK_FRICTION: f32 = 0.05;

    /// Bat speed ceiling in pixels per millisecond
    pub const BAT_MAX_SPEED: f32 = 0.6;
    /// Velocity added per held direction key (capped afterwards)
    pub const BAT_KEY_IMPULSE: f32 = 1.0;
    /// Share of the bat's normal velocity handed to the puck on a hit
    pub const BAT_PUSH: f32 = 0.5;

    /// Relative masses used to split de-penetration
    pub const BAT_MASS: f32 = 4.0;
    pub const PUCK_MASS: f32 = 1.0;

    /// Physics slices per rendered frame
    pub const SUBSTEPS: u32 = 50;
    /// Minimum wall-clock time per frame (60 fps)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Wind direction is re-rolled this often
    pub const WIND_PERIOD_MS: u64 = 5000;
    /// Wind speed at |rate| = 1, added to the puck once per second of play
    pub const WIND_MAX_MAGNITUDE: f32 = 0.3;
    /// Where the wind indicator is drawn
    pub const WIND_BAR_Y: f32 = 50.0;
}

/// Clamp a vector's length to `max_len`, keeping its direction
///
/// Zero stays zero whatever the limit.
#[inline]
pub fn cap_length(v: Vec2, max_len: f32) -> Vec2 {
    debug_assert!(max_len >= 0.0, "negative length cap {max_len}");
    let len = v.length();
    if len <= max_len || len == 0.0 {
        v
    } else {
        v * (max_len / len)
    }
}

/// Vector magnitude
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}
