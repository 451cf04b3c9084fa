//! Piece supply invariant: pieces leave the board only by capture.

use super::Invariant;
use crate::{Color, Game};
use strum::IntoEnumIterator;

/// Invariant: for each color, pieces on the board plus pieces the opponent
/// has captured equals what that color started with.
///
/// Together with captures only ever counting up, this makes the total piece
/// count non-increasing over the life of a game.
pub struct PieceSupplyInvariant;

impl Invariant<Game> for PieceSupplyInvariant {
    fn holds(game: &Game) -> bool {
        let on_board = game.board().count_pieces();
        let start = game.starting_counts();
        Color::iter().all(|color| {
            on_board.of(color) + game.captures().by(color.opponent()) == start.of(color)
        })
    }

    fn description() -> &'static str {
        "Pieces leave the board only by capture"
    }
}
