//! Contract-based validation for checkers.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::Move;
use crate::error::MoveError;
use crate::game::Game;
use crate::invariants::{DamesInvariants, InvariantSet};
use crate::rules;
use tracing::{error, instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Contract for moves.
///
/// Preconditions:
/// - The game has no outcome yet
/// - The move passes [`rules::check_move`] for the side on turn
///
/// Postconditions:
/// - All [`DamesInvariants`] hold
/// - The piece count dropped by exactly the number of captures made
pub struct MoveContract;

impl Contract<Game, Move> for MoveContract {
    #[instrument(skip(game), fields(action = %action))]
    fn pre(game: &Game, action: &Move) -> Result<(), MoveError> {
        if !game.status().is_in_progress() {
            return Err(MoveError::GameOver);
        }
        rules::check_move(game.board(), game.turn(), action.from, action.to).map_err(|reason| {
            warn!(reason = %reason, "Move rejected");
            MoveError::Illegal(reason)
        })
    }

    #[instrument(skip_all)]
    fn post(before: &Game, after: &Game) -> Result<(), MoveError> {
        let mut problems: Vec<String> = match DamesInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations.into_iter().map(|v| v.description).collect(),
        };

        let removed = before
            .board()
            .count_pieces()
            .total()
            .checked_sub(after.board().count_pieces().total());
        let captured = after
            .captures()
            .total()
            .checked_sub(before.captures().total());
        if removed.is_none() || removed != captured {
            problems.push(format!(
                "Piece count dropped by {removed:?} but captures rose by {captured:?}"
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            let description = problems.join("; ");
            error!(%description, "Postcondition failed");
            Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {description}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Cell, Color, Coord, Piece, Rejection};

    fn at(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_precondition_legal_move() {
        let game = Game::new();
        let action = Move::new(at("C6"), at("D5"));
        assert!(MoveContract::pre(&game, &action).is_ok());
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = Game::new();
        let action = Move::new(at("D3"), at("C4"));
        assert_eq!(
            MoveContract::pre(&game, &action),
            Err(MoveError::Illegal(Rejection::WrongTurn))
        );
    }

    #[test]
    fn test_precondition_finished_game() {
        let mut board = Board::empty();
        board.place(at("E6"), Cell::Occupied(Piece::man(Color::Light)));
        board.place(at("D5"), Cell::Occupied(Piece::man(Color::Dark)));
        let mut game = Game::from_position(board, Color::Light).unwrap();
        game.play_move(at("E6"), at("C4")).unwrap();

        let action = Move::new(at("C4"), at("B3"));
        assert_eq!(MoveContract::pre(&game, &action), Err(MoveError::GameOver));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = Game::new();
        let mut after = before.clone();
        after.play_move(at("C6"), at("D5")).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_vanished_piece() {
        let before = Game::new();
        let mut after = before.clone();
        after.play_move(at("C6"), at("D5")).unwrap();
        after.board.place(at("B1"), Cell::Empty);

        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
