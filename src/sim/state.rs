//! Table entities and the complete simulation state
//!
//! Everything a frame mutates lives in `Field`, so a snapshot of it is the
//! whole story for determinism checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::MovingBody;
use super::board::{Ally, Board, Color};
use super::shape::{Shape, contact_point, overlaps};
use super::wind::Wind;
use crate::Settings;

/// Anything with a collision shape
pub trait Collider {
    fn shape(&self) -> Shape;
}

/// Symmetric collision test between any two colliders
pub fn does_collide(a: &impl Collider, b: &impl Collider) -> bool {
    overlaps(&a.shape(), &b.shape())
}

/// Point on `a`'s boundary facing `b`, used as the reflection contact
pub fn collision_point(a: &impl Collider, b: &impl Collider) -> Vec2 {
    contact_point(&a.shape(), &b.shape())
}

/// Result of one simulation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Play continues
    None,
    Red,
    Blue,
}

impl Winner {
    /// The side credited when the puck enters the goal `defender` guards
    pub fn scored_against(defender: Color) -> Self {
        match defender {
            Color::Red => Winner::Blue,
            Color::Blue => Winner::Red,
        }
    }
}

/// Score counters shown on screen. Owned by the driver, read by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub red: u32,
    pub blue: u32,
}

impl Stat {
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Red => self.red += 1,
            Winner::Blue => self.blue += 1,
            Winner::None => {}
        }
    }
}

/// A player paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bat {
    pub body: MovingBody,
    color: Color,
    ally: Ally,
    radius: f32,
}

impl Bat {
    pub fn new(color: Color, ally: Ally, pos: Vec2, radius: f32, settings: &Settings) -> Self {
        assert!(radius > 0.0, "bat radius {radius} must be positive");
        Self {
            body: MovingBody::new(pos, settings.bat_friction, settings.bat_max_speed),
            color,
            ally,
            radius,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn ally(&self) -> Ally {
        self.ally
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Collider for Bat {
    fn shape(&self) -> Shape {
        Shape::circle(self.body.pos, self.radius)
    }
}

/// The puck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub body: MovingBody,
    radius: f32,
}

impl Puck {
    /// Puck with the stock friction and speed ceiling
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self::with_settings(pos, radius, &Settings::default())
    }

    pub fn with_settings(pos: Vec2, radius: f32, settings: &Settings) -> Self {
        assert!(radius > 0.0, "puck radius {radius} must be positive");
        Self {
            body: MovingBody::new(pos, settings.puck_friction, settings.puck_max_speed),
            radius,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Collider for Puck {
    fn shape(&self) -> Shape {
        Shape::circle(self.body.pos, self.radius)
    }
}

/// Slot of each bat in `Field::bats`; also the order reflections and
/// de-penetration visit them in.
pub const BAT_ORDER: [(Color, Ally); 4] = [
    (Color::Red, Ally::One),
    (Color::Red, Ally::Two),
    (Color::Blue, Ally::One),
    (Color::Blue, Ally::Two),
];

/// Complete dynamic state of one match (serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub board: Board,
    pub bats: [Bat; 4],
    pub puck: Puck,
    pub wind: Wind,
    /// Bat currently steered by each side
    pub active_red: Ally,
    pub active_blue: Ally,
}

impl Field {
    /// Everything at its spawn point, at rest, with calm wind
    pub fn new(board: Board, settings: &Settings) -> Self {
        let bats = BAT_ORDER.map(|(color, ally)| {
            Bat::new(
                color,
                ally,
                board.init_bat_pos(color, ally),
                settings.bat_radius,
                settings,
            )
        });
        let puck = Puck::with_settings(board.init_puck_pos(), settings.puck_radius, settings);
        let wind = Wind::new(
            Vec2::new(crate::consts::SCREEN_WIDTH / 2.0, crate::consts::WIND_BAR_Y),
            settings.wind_max_magnitude,
        );
        Self {
            board,
            bats,
            puck,
            wind,
            active_red: Ally::One,
            active_blue: Ally::One,
        }
    }

    pub fn bat_index(color: Color, ally: Ally) -> usize {
        match (color, ally) {
            (Color::Red, Ally::One) => 0,
            (Color::Red, Ally::Two) => 1,
            (Color::Blue, Ally::One) => 2,
            (Color::Blue, Ally::Two) => 3,
        }
    }

    pub fn bat(&self, color: Color, ally: Ally) -> &Bat {
        &self.bats[Self::bat_index(color, ally)]
    }

    pub fn bat_mut(&mut self, color: Color, ally: Ally) -> &mut Bat {
        &mut self.bats[Self::bat_index(color, ally)]
    }

    pub fn active(&self, color: Color) -> Ally {
        match color {
            Color::Red => self.active_red,
            Color::Blue => self.active_blue,
        }
    }

    pub fn active_bat_mut(&mut self, color: Color) -> &mut Bat {
        let ally = self.active(color);
        self.bat_mut(color, ally)
    }

    /// Hand control to the side's other bat
    pub fn swap_active(&mut self, color: Color) {
        match color {
            Color::Red => self.active_red = self.active_red.other(),
            Color::Blue => self.active_blue = self.active_blue.other(),
        }
    }
}
