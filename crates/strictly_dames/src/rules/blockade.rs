//! Blockade detection: does a side have any move at all?

use super::validate::is_legal_move;
use crate::action::Move;
use crate::board::Board;
use crate::types::Color;
use tracing::instrument;

/// Every diagonal step a piece could possibly take: one or two cells in
/// each of the four directions. Any other offset fails validation anyway.
const DIAGONAL_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-2, -2),
    (2, -2),
    (-2, 2),
    (2, 2),
];

/// Lists every legal move for `color`, in board order.
#[instrument(skip(board), fields(color = %color))]
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    candidate_moves(board, color)
        .filter(|step| is_legal_move(board, color, step.from, step.to))
        .collect()
}

/// Returns true if `color` has at least one legal move.
#[instrument(skip(board), fields(color = %color))]
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    candidate_moves(board, color).any(|step| is_legal_move(board, color, step.from, step.to))
}

fn candidate_moves(board: &Board, color: Color) -> impl Iterator<Item = Move> + '_ {
    board.pieces(color).flat_map(|(from, _)| {
        DIAGONAL_STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| from.offset(dx, dy).map(|to| Move::new(from, to)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Coord, Piece};

    fn at(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::new();
        // Each side has four men on its front row, with 7 diagonal steps between them.
        assert_eq!(legal_moves(&board, Color::Light).len(), 7);
        assert_eq!(legal_moves(&board, Color::Dark).len(), 7);
        assert!(has_legal_move(&board, Color::Light));
    }

    #[test]
    fn test_no_pieces_no_moves() {
        let board = Board::empty();
        assert!(!has_legal_move(&board, Color::Dark));
        assert!(legal_moves(&board, Color::Dark).is_empty());
    }

    #[test]
    fn test_man_stuck_on_far_edge() {
        // A Dark man on row 8 can only move forward, off the board.
        let mut board = Board::empty();
        board.place(at("A8"), Cell::Occupied(Piece::man(Color::Dark)));
        assert!(!has_legal_move(&board, Color::Dark));
    }

    #[test]
    fn test_blocked_by_opposing_wall() {
        // Dark man on A6: its only forward cell B7 holds a Light man, and the
        // landing cell C8 behind it is taken too.
        let mut board = Board::empty();
        board.place(at("A6"), Cell::Occupied(Piece::man(Color::Dark)));
        board.place(at("B7"), Cell::Occupied(Piece::man(Color::Light)));
        board.place(at("C8"), Cell::Occupied(Piece::man(Color::Light)));
        assert!(!has_legal_move(&board, Color::Dark));
        assert!(has_legal_move(&board, Color::Light));
    }

    #[test]
    fn test_capture_counts_as_a_move() {
        let mut board = Board::empty();
        board.place(at("A6"), Cell::Occupied(Piece::man(Color::Dark)));
        board.place(at("B7"), Cell::Occupied(Piece::man(Color::Light)));
        let moves = legal_moves(&board, Color::Dark);
        assert_eq!(moves, vec![Move::new(at("A6"), at("C8"))]);
    }
}
