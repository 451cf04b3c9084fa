//! Dark squares invariant: pieces only ever stand on dark cells.

use super::Invariant;
use crate::{Coord, Game};

/// Invariant: every piece sits on a cell where `x + y` is odd.
pub struct DarkSquaresInvariant;

impl Invariant<Game> for DarkSquaresInvariant {
    fn holds(game: &Game) -> bool {
        Coord::all()
            .filter(|at| !at.is_dark())
            .all(|at| game.board().cell(at).is_empty())
    }

    fn description() -> &'static str {
        "Pieces only occupy dark cells"
    }
}
