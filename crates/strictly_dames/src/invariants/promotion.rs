//! Promotion invariant: no man is left standing on its promotion row.

use super::Invariant;
use crate::{Color, Game, Rank};
use strum::IntoEnumIterator;

/// Invariant: a man that reaches the far row is crowned on the same move,
/// so no man of a color ever rests on that color's promotion row.
pub struct PromotionInvariant;

impl Invariant<Game> for PromotionInvariant {
    fn holds(game: &Game) -> bool {
        Color::iter().all(|color| {
            game.board()
                .pieces(color)
                .all(|(at, piece)| piece.rank == Rank::King || at.y() != color.promotion_row())
        })
    }

    fn description() -> &'static str {
        "Men on the far row are crowned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Coord, Piece};

    #[test]
    fn test_new_game_holds() {
        assert!(PromotionInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_uncrowned_man_violates() {
        let mut game = Game::new();
        let b1: Coord = "B1".parse().unwrap();
        game.board.place(b1, Cell::Occupied(Piece::man(Color::Light)));
        assert!(!PromotionInvariant::holds(&game));
    }
}
