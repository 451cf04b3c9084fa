//! Error types for the checkers engine.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A coordinate outside the 8x8 board.
///
/// Raised only when a caller hands the engine a bad coordinate, which
/// points at a parsing defect upstream rather than a bad move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Coordinate ({}, {}) is outside the board", x, y)]
pub struct OutOfRangeError {
    /// Requested column.
    pub x: i32,
    /// Requested row.
    pub y: i32,
}

/// Text that is not a chat coordinate such as `C3`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid coordinate {:?} (expected A-H followed by 1-8)", input)]
pub struct CoordParseError {
    /// The rejected input.
    pub input: String,
}

impl CoordParseError {
    /// Creates a parse error for the given input.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Why a proposed move was refused.
///
/// The kebab-case tag (`no-piece`, `wrong-turn`, ...) is stable and meant for
/// the dispatcher to translate into a user-facing message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    /// The origin cell is empty.
    NoPiece,
    /// The origin piece belongs to the side not on move.
    WrongTurn,
    /// The destination already holds a piece.
    OccupiedDestination,
    /// Not a one- or two-step diagonal the piece may make.
    BadGeometry,
    /// The jumped piece belongs to the mover.
    OwnPieceCapture,
}

impl Rejection {
    /// Stable tag for this rejection.
    pub fn tag(self) -> &'static str {
        self.into()
    }
}

impl std::error::Error for Rejection {}

/// Error that can occur when playing a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum MoveError {
    /// A coordinate was off the board.
    #[from]
    #[display("{}", _0)]
    OutOfRange(OutOfRangeError),

    /// The move failed validation; the game is unchanged.
    #[from]
    #[display("Illegal move: {}", _0)]
    Illegal(Rejection),

    /// The game already has an outcome.
    #[display("Game is already over")]
    GameOver,

    /// A postcondition failed after the move was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
