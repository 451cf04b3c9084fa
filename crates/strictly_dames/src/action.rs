//! First-class move types.
//!
//! A move is just the two cells involved; who makes it is always the side
//! on turn, so it carries no color of its own.

use crate::types::{Coord, Piece};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A proposed relocation from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Origin cell.
    pub from: Coord,
    /// Destination cell.
    pub to: Coord,
}

impl Move {
    /// Column offset.
    pub fn dx(&self) -> i32 {
        self.to.x() - self.from.x()
    }

    /// Row offset.
    pub fn dy(&self) -> i32 {
        self.to.y() - self.from.y()
    }

    /// True for a two-cell diagonal jump.
    pub fn is_jump(&self) -> bool {
        self.dx().abs() == 2 && self.dy().abs() == 2
    }

    /// The jumped-over cell of a two-cell diagonal.
    pub fn midpoint(&self) -> Option<Coord> {
        if !self.is_jump() {
            return None;
        }
        self.from.offset(self.dx() / 2, self.dy() / 2)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// What applying a move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveEffects {
    /// Cell whose piece was captured, for jumps.
    pub captured: Option<Coord>,
    /// Whether the moving man was crowned.
    pub promoted: bool,
}

/// The most recent move of a game, as recorded for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct LastMove {
    /// Origin cell.
    pub from: Coord,
    /// Destination cell.
    pub to: Coord,
    /// The piece as it was before the move (a man stays a man here even if crowned).
    pub piece: Piece,
}
