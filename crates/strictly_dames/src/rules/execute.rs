//! Move application.

use crate::action::{Move, MoveEffects};
use crate::board::Board;
use crate::types::{Cell, Color, Coord};
use tracing::{debug, instrument};

/// Applies a move that [`check_move`](super::check_move) has accepted.
///
/// Relocates the piece, clears the jumped cell for captures and crowns a
/// man that reaches `turn`'s promotion row. Calling this with an unchecked
/// move leaves the board in an unspecified state.
#[instrument(skip(board), fields(turn = %turn, from = %from, to = %to))]
pub fn apply(board: &mut Board, turn: Color, from: Coord, to: Coord) -> MoveEffects {
    let mut effects = MoveEffects::default();
    let Some(piece) = board.piece(from) else {
        return effects;
    };
    debug_assert_eq!(piece.color, turn, "applied a move for the side not on turn");

    board.place(to, Cell::Occupied(piece));
    board.place(from, Cell::Empty);

    if let Some(mid) = Move::new(from, to).midpoint() {
        board.place(mid, Cell::Empty);
        effects.captured = Some(mid);
        debug!(captured = %mid, "Captured piece");
    }

    if !piece.is_king() && to.y() == turn.promotion_row() {
        board.place(to, Cell::Occupied(piece.crowned()));
        effects.promoted = true;
        debug!(at = %to, "Man crowned");
    }

    effects
}
