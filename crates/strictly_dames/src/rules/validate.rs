//! Move legality.

use crate::action::Move;
use crate::board::Board;
use crate::error::Rejection;
use crate::types::{Color, Coord};
use tracing::instrument;

/// Checks whether `turn` may move the piece on `from` to `to`.
///
/// Checks run in a fixed order and the first failure wins:
/// the origin must hold a piece of `turn`, the destination must be empty
/// and dark, and the step must be a one-cell diagonal (simple move) or a
/// two-cell diagonal over an opposing piece (capture). Men only go forward;
/// kings go any diagonal direction.
///
/// Only single jumps are recognised. A piece that lands after a capture is
/// never required or allowed to continue jumping in the same move.
#[instrument(skip(board), fields(turn = %turn, from = %from, to = %to))]
pub fn check_move(board: &Board, turn: Color, from: Coord, to: Coord) -> Result<(), Rejection> {
    let piece = board.piece(from).ok_or(Rejection::NoPiece)?;
    if piece.color != turn {
        return Err(Rejection::WrongTurn);
    }
    if !board.cell(to).is_empty() {
        return Err(Rejection::OccupiedDestination);
    }
    if !to.is_dark() {
        return Err(Rejection::BadGeometry);
    }

    let step = Move::new(from, to);
    let forward = |dy: i32| piece.is_king() || dy.signum() == turn.forward();

    match (step.dx().abs(), step.dy().abs()) {
        (1, 1) if forward(step.dy()) => Ok(()),
        (2, 2) => {
            let jumped = step
                .midpoint()
                .and_then(|mid| board.piece(mid))
                .ok_or(Rejection::BadGeometry)?;
            if jumped.color == turn {
                return Err(Rejection::OwnPieceCapture);
            }
            if forward(step.dy()) {
                Ok(())
            } else {
                Err(Rejection::BadGeometry)
            }
        }
        _ => Err(Rejection::BadGeometry),
    }
}

/// Boolean form of [`check_move`].
pub fn is_legal_move(board: &Board, turn: Color, from: Coord, to: Coord) -> bool {
    check_move(board, turn, from, to).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Piece};

    fn at(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn board_with(pieces: &[(&str, Piece)]) -> Board {
        let mut board = Board::empty();
        for (square, piece) in pieces {
            board.place(at(square), Cell::Occupied(*piece));
        }
        board
    }

    #[test]
    fn test_opening_simple_move() {
        let board = Board::new();
        assert_eq!(check_move(&board, Color::Light, at("A6"), at("B5")), Ok(()));
        assert_eq!(check_move(&board, Color::Dark, at("B3"), at("A4")), Ok(()));
    }

    #[test]
    fn test_empty_origin() {
        let board = Board::new();
        assert_eq!(
            check_move(&board, Color::Light, at("C3"), at("D4")),
            Err(Rejection::NoPiece)
        );
    }

    #[test]
    fn test_wrong_turn() {
        let board = Board::new();
        assert_eq!(
            check_move(&board, Color::Light, at("B3"), at("A4")),
            Err(Rejection::WrongTurn)
        );
    }

    #[test]
    fn test_occupied_destination() {
        let board = Board::new();
        assert_eq!(
            check_move(&board, Color::Light, at("A8"), at("B7")),
            Err(Rejection::OccupiedDestination)
        );
    }

    #[test]
    fn test_man_cannot_move_backward() {
        let board = board_with(&[("D5", Piece::man(Color::Light))]);
        assert_eq!(
            check_move(&board, Color::Light, at("D5"), at("C6")),
            Err(Rejection::BadGeometry)
        );
        assert_eq!(check_move(&board, Color::Light, at("D5"), at("C4")), Ok(()));
    }

    #[test]
    fn test_king_moves_any_diagonal() {
        let board = board_with(&[("D5", Piece::king(Color::Light))]);
        for dest in ["C4", "E4", "C6", "E6"] {
            assert_eq!(check_move(&board, Color::Light, at("D5"), at(dest)), Ok(()));
        }
    }

    #[test]
    fn test_non_diagonal_rejected() {
        let board = board_with(&[("D5", Piece::king(Color::Dark))]);
        for dest in ["D7", "F5", "F6", "G8", "A2"] {
            assert_eq!(
                check_move(&board, Color::Dark, at("D5"), at(dest)),
                Err(Rejection::BadGeometry),
                "D5 -> {dest}"
            );
        }
    }

    #[test]
    fn test_capture_forward() {
        let board = board_with(&[
            ("E6", Piece::man(Color::Light)),
            ("D5", Piece::man(Color::Dark)),
        ]);
        assert_eq!(check_move(&board, Color::Light, at("E6"), at("C4")), Ok(()));
    }

    #[test]
    fn test_capture_over_empty_cell() {
        let board = board_with(&[("E6", Piece::man(Color::Light))]);
        assert_eq!(
            check_move(&board, Color::Light, at("E6"), at("C4")),
            Err(Rejection::BadGeometry)
        );
    }

    #[test]
    fn test_capture_own_piece() {
        let board = board_with(&[
            ("E6", Piece::man(Color::Light)),
            ("D5", Piece::man(Color::Light)),
        ]);
        assert_eq!(
            check_move(&board, Color::Light, at("E6"), at("C4")),
            Err(Rejection::OwnPieceCapture)
        );
    }

    #[test]
    fn test_capture_into_occupied_cell() {
        let board = board_with(&[
            ("E6", Piece::man(Color::Light)),
            ("D5", Piece::man(Color::Dark)),
            ("C4", Piece::man(Color::Dark)),
        ]);
        assert_eq!(
            check_move(&board, Color::Light, at("E6"), at("C4")),
            Err(Rejection::OccupiedDestination)
        );
    }

    #[test]
    fn test_man_cannot_capture_backward() {
        let board = board_with(&[
            ("C4", Piece::man(Color::Light)),
            ("D5", Piece::man(Color::Dark)),
        ]);
        assert_eq!(
            check_move(&board, Color::Light, at("C4"), at("E6")),
            Err(Rejection::BadGeometry)
        );
    }

    #[test]
    fn test_dark_man_cannot_capture_backward() {
        let board = board_with(&[
            ("D5", Piece::man(Color::Dark)),
            ("C4", Piece::man(Color::Light)),
        ]);
        assert_eq!(
            check_move(&board, Color::Dark, at("D5"), at("B3")),
            Err(Rejection::BadGeometry)
        );

        let board = board_with(&[
            ("D5", Piece::king(Color::Dark)),
            ("C4", Piece::man(Color::Light)),
        ]);
        assert_eq!(check_move(&board, Color::Dark, at("D5"), at("B3")), Ok(()));
    }

    #[test]
    fn test_king_captures_backward() {
        let board = board_with(&[
            ("C4", Piece::king(Color::Light)),
            ("D5", Piece::man(Color::Dark)),
        ]);
        assert_eq!(check_move(&board, Color::Light, at("C4"), at("E6")), Ok(()));
    }

    #[test]
    fn test_dark_moves_toward_higher_rows() {
        let board = board_with(&[("B3", Piece::man(Color::Dark))]);
        assert!(is_legal_move(&board, Color::Dark, at("B3"), at("C4")));
        assert!(!is_legal_move(&board, Color::Dark, at("B3"), at("C2")));
    }

    #[test]
    fn test_light_cell_destination() {
        let board = board_with(&[("B3", Piece::king(Color::Dark))]);
        assert_eq!(
            check_move(&board, Color::Dark, at("B3"), at("B4")),
            Err(Rejection::BadGeometry)
        );
    }
}
