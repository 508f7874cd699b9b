//! Rendering capability
//!
//! The simulation never draws by itself. Each frame it hands a read-only
//! `FrameView` to whatever `Renderer` the driver passed in, so the core runs
//! headless under test.

use crate::sim::board::Board;
use crate::sim::shape::Rect;
use crate::sim::state::{Bat, Puck, Stat};
use crate::sim::wind::Wind;

/// Where the two score counters go, derived from the board edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreLayout {
    pub blue: Rect,
    pub red: Rect,
}

impl ScoreLayout {
    pub fn for_board(board: &Board) -> Self {
        Self {
            blue: Rect::new(board.left() + 70.0, 25.0, 75.0, 75.0),
            red: Rect::new(board.right() - 200.0, 25.0, 75.0, 75.0),
        }
    }
}

/// Everything visible in one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub board: &'a Board,
    pub bats: &'a [Bat; 4],
    pub puck: &'a Puck,
    pub wind: &'a Wind,
    pub stat: &'a Stat,
    pub scores: ScoreLayout,
}

/// Draws a finished frame
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameView<'_>) {}
}
