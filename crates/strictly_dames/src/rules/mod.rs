//! Game rules for checkers.
//!
//! This module contains pure functions over a [`Board`](crate::Board) and the
//! side on move. Nothing here knows about sessions or history; the state
//! machine in [`crate::game`] sequences them.

pub mod blockade;
pub mod execute;
pub mod validate;

pub use blockade::{has_legal_move, legal_moves};
pub use execute::apply;
pub use validate::{check_move, is_legal_move};
