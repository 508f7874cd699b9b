//! Static field geometry: walls, goals and spawn points

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Rect, Shape, overlaps};
use super::state::{Collider, Puck};
use crate::consts::*;

/// Team colour. Blue defends the left goal, red the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
}

/// Which of a side's two bats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ally {
    One,
    Two,
}

impl Ally {
    pub fn other(self) -> Self {
        match self {
            Ally::One => Ally::Two,
            Ally::Two => Ally::One,
        }
    }
}

/// The table. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    field: Rect,
    goal_width: f32,
    goal_depth: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(FIELD_LEFT, FIELD_TOP, FIELD_WIDTH, FIELD_HEIGHT)
    }
}

impl Board {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::with_goals(left, top, width, height, GOAL_WIDTH, GOAL_DEPTH)
    }

    pub fn with_goals(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        goal_width: f32,
        goal_depth: f32,
    ) -> Self {
        assert!(width > 0.0 && height > 0.0, "empty board {width}x{height}");
        assert!(
            goal_width > 0.0 && goal_width <= height,
            "goal width {goal_width} does not fit a board {height} high"
        );
        assert!(goal_depth > 0.0, "goal depth {goal_depth} must be positive");
        Self {
            field: Rect::new(left, top, width, height),
            goal_width,
            goal_depth,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.field.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.field.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.field.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.field.max.y
    }

    pub fn field(&self) -> &Rect {
        &self.field
    }

    pub fn center(&self) -> Vec2 {
        self.field.center()
    }

    /// Vertical span `(top, bottom)` of both goal mouths
    pub fn goal_mouth(&self) -> (f32, f32) {
        let mid = self.field.center().y;
        (mid - self.goal_width / 2.0, mid + self.goal_width / 2.0)
    }

    /// Whether `y` lies within the goal mouth opening
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        let (top, bottom) = self.goal_mouth();
        y >= top && y <= bottom
    }

    /// Net behind the goal line defended by `color`
    pub fn goal_rect(&self, color: Color) -> Rect {
        let (top, _) = self.goal_mouth();
        let x = match color {
            Color::Blue => self.left() - self.goal_depth,
            Color::Red => self.right(),
        };
        Rect::new(x, top, self.goal_depth, self.goal_width)
    }

    /// True once the puck reaches the goal that `color` defends
    ///
    /// Touching the net counts, and so does any puck whose center is level with
    /// the mouth and whose edge has crossed the goal line, however far it flew.
    /// Deciding who scores is the caller's job.
    pub fn does_puck_collide_with_goal(&self, color: Color, puck: &Puck) -> bool {
        let pos = puck.body.pos;
        let r = puck.radius();
        let crossed = match color {
            Color::Blue => pos.x - r <= self.left(),
            Color::Red => pos.x + r >= self.right(),
        };
        (crossed && self.in_goal_mouth(pos.y))
            || overlaps(&Shape::Rect(self.goal_rect(color)), &puck.shape())
    }

    /// Spawn point of a bat: `One` guards the goal, `Two` plays forward
    pub fn init_bat_pos(&self, color: Color, ally: Ally) -> Vec2 {
        let depth = match ally {
            Ally::One => self.field.width() / 8.0,
            Ally::Two => self.field.width() * 3.0 / 8.0,
        };
        let x = match color {
            Color::Blue => self.left() + depth,
            Color::Red => self.right() - depth,
        };
        Vec2::new(x, self.field.center().y)
    }

    pub fn init_puck_pos(&self) -> Vec2 {
        self.field.center()
    }
}
