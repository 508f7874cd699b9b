//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must stay pure and deterministic:
//! - Time only enters as the frame's elapsed milliseconds
//! - Seeded RNG only
//! - Fixed iteration order over bodies
//! - No rendering or platform dependencies beyond the injected traits

pub mod body;
pub mod board;
pub mod collision;
pub mod shape;
pub mod state;
pub mod tick;
pub mod wind;

pub use body::MovingBody;
pub use board::{Ally, Board, Color};
pub use collision::{reflect_off_bat, reflect_off_board, reflect_velocity, uncollide};
pub use shape::{Contact, Rect, Shape, contact_point, overlaps, penetration};
pub use state::{BAT_ORDER, Bat, Collider, Field, Puck, Stat, Winner, collision_point, does_collide};
pub use tick::Match;
pub use wind::Wind;
