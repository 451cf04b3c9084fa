//! Strictly Dames - checkers rules as a pure state machine.
//!
//! The engine knows nothing about chats or sessions: it holds one game,
//! validates moves for the side on turn, applies them and reports when the
//! game is over.
//!
//! # Architecture
//!
//! - **Board**: 8x8 grid of [`Cell`]s addressed by [`Coord`]
//! - **Rules**: [`rules::check_move`] (validation), [`rules::apply`]
//!   (execution) and [`rules::has_legal_move`] (blockade detection)
//! - **Game**: the state machine sequencing the rules
//! - **Contracts/Invariants**: postconditions checked after every move in
//!   debug builds
//!
//! # Example
//!
//! ```
//! use strictly_dames::{Color, Coord, Game, GameStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::new();
//! let from: Coord = "A6".parse()?;
//! let to: Coord = "B5".parse()?;
//!
//! let outcome = game.play_move(from, to)?;
//! assert_eq!(outcome.status, GameStatus::InProgress);
//! assert_eq!(game.turn(), Color::Dark);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod contracts;
mod error;
mod game;
pub mod invariants;
pub mod rules;
mod types;

pub use action::{LastMove, Move, MoveEffects};
pub use board::Board;
pub use error::{CoordParseError, MoveError, OutOfRangeError, Rejection};
pub use game::{CaptureCounts, Game, GameStatus, PlayOutcome};
pub use types::{BOARD_SIZE, Cell, Color, Coord, Piece, PieceCounts, Rank};
