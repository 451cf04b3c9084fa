//! The checkers state machine.
//!
//! [`Game`] owns the board, the side on turn, capture tallies and the game
//! status. It is the only writer of that state; every change goes through
//! [`Game::play_move`], which sequences validation, execution and the
//! terminal checks.

use crate::action::{LastMove, Move, MoveEffects};
use crate::board::Board;
use crate::contracts::{Contract, MoveContract};
use crate::error::{MoveError, Rejection};
use crate::invariants::{DamesInvariants, InvariantSet};
use crate::rules;
use crate::types::{Color, Coord, PieceCounts};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    InProgress,
    /// The given color captured every opposing piece.
    Won(Color),
    /// The opponent of the given color was left without a legal move; the
    /// given color wins.
    Blocked(Color),
    /// Reserved: no rule currently ends a game in a draw.
    Drawn,
}

impl GameStatus {
    /// Returns true while moves are accepted.
    pub fn is_in_progress(self) -> bool {
        self == GameStatus::InProgress
    }

    /// Returns the winning color, if the game has one.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Won(color) | GameStatus::Blocked(color) => Some(color),
            GameStatus::InProgress | GameStatus::Drawn => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(color) => write!(f, "{color} wins by capturing every piece"),
            GameStatus::Blocked(color) => write!(f, "{color} wins by blockade"),
            GameStatus::Drawn => write!(f, "Draw"),
        }
    }
}

/// Pieces captured by each color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureCounts {
    /// Captures made by Light.
    pub light: u32,
    /// Captures made by Dark.
    pub dark: u32,
}

impl CaptureCounts {
    /// Captures made by `color`.
    pub fn by(&self, color: Color) -> u32 {
        match color {
            Color::Light => self.light,
            Color::Dark => self.dark,
        }
    }

    /// Captures made by both colors.
    pub fn total(&self) -> u32 {
        self.light + self.dark
    }

    fn record(&mut self, color: Color) {
        match color {
            Color::Light => self.light += 1,
            Color::Dark => self.dark += 1,
        }
    }
}

/// Result of a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// The color that moved.
    pub mover: Color,
    /// Capture and promotion details.
    pub effects: MoveEffects,
    /// Status after the move.
    pub status: GameStatus,
}

/// A game of checkers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) board: Board,
    turn: Color,
    status: GameStatus,
    captures: CaptureCounts,
    move_count: u32,
    last_move: Option<LastMove>,
    starting_counts: PieceCounts,
}

impl Game {
    /// Creates a game at the opening position with Light to move.
    #[instrument]
    pub fn new() -> Self {
        Self::seeded(Board::new(), Color::Light)
    }

    /// Creates a game from an arbitrary position.
    ///
    /// The position is taken as the starting point for the piece-supply
    /// invariant. A side to move with no pieces has already lost, and one
    /// with pieces but no legal move is blockaded; either way the game starts
    /// finished.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvariantViolation`] if a piece stands on a light cell or
    /// a man stands on its own promotion row.
    #[instrument(skip(board), fields(turn = %turn))]
    pub fn from_position(board: Board, turn: Color) -> Result<Self, MoveError> {
        let mut game = Self::seeded(board, turn);
        if let Err(violations) = DamesInvariants::check_all(&game) {
            let description = violations
                .into_iter()
                .map(|v| v.description)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%description, "Rejected starting position");
            return Err(MoveError::InvariantViolation(format!(
                "Invalid starting position: {description}"
            )));
        }

        let opponent = turn.opponent();
        if game.board.count_pieces().of(turn) == 0 {
            info!(winner = %opponent, "Side to move starts without pieces");
            game.status = GameStatus::Won(opponent);
        } else if !rules::has_legal_move(&game.board, turn) {
            info!(winner = %opponent, blocked = %turn, "Side to move starts without a legal move");
            game.status = GameStatus::Blocked(opponent);
        }
        Ok(game)
    }

    fn seeded(board: Board, turn: Color) -> Self {
        let starting_counts = board.count_pieces();
        Self {
            board,
            turn,
            status: GameStatus::InProgress,
            captures: CaptureCounts::default(),
            move_count: 0,
            last_move: None,
            starting_counts,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color on turn. After a game ends this is the color that
    /// made the final move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns capture tallies.
    pub fn captures(&self) -> CaptureCounts {
        self.captures
    }

    /// Returns the number of moves played.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns the last move played, if any.
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Returns the piece counts this game started with.
    pub fn starting_counts(&self) -> PieceCounts {
        self.starting_counts
    }

    /// Lists the legal moves for the color on turn.
    pub fn legal_moves(&self) -> Vec<Move> {
        if !self.status.is_in_progress() {
            return Vec::new();
        }
        rules::legal_moves(&self.board, self.turn)
    }

    /// Plays a move for the color on turn.
    ///
    /// On success the move has been applied, capture and move counters
    /// updated, and the terminal checks run: if the opponent has no pieces
    /// left the mover wins; otherwise, if the opponent has no legal move, the
    /// mover wins by blockade; otherwise the turn passes. The turn does not
    /// change when a move ends the game.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game already has an outcome
    /// - [`MoveError::Illegal`] if the move fails validation; the game is
    ///   unchanged
    /// - [`MoveError::InvariantViolation`] (debug builds only) if the move
    ///   left the game in an inconsistent state
    #[instrument(skip(self), fields(turn = %self.turn, from = %from, to = %to))]
    pub fn play_move(&mut self, from: Coord, to: Coord) -> Result<PlayOutcome, MoveError> {
        let action = Move::new(from, to);
        MoveContract::pre(self, &action)?;
        let piece = self.board.piece(from).ok_or(Rejection::NoPiece)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mover = self.turn;
        let effects = rules::apply(&mut self.board, mover, from, to);
        self.move_count += 1;
        if effects.captured.is_some() {
            self.captures.record(mover);
        }
        self.last_move = Some(LastMove::new(from, to, piece));

        let opponent = mover.opponent();
        if self.board.count_pieces().of(opponent) == 0 {
            info!(winner = %mover, "Every opposing piece captured");
            self.status = GameStatus::Won(mover);
        } else if !rules::has_legal_move(&self.board, opponent) {
            info!(winner = %mover, blocked = %opponent, "Opponent has no legal move");
            self.status = GameStatus::Blocked(mover);
        } else {
            self.turn = opponent;
        }

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        debug!(
            captured = effects.captured.is_some(),
            promoted = effects.promoted,
            status = %self.status,
            "Move applied"
        );

        Ok(PlayOutcome {
            mover,
            effects,
            status: self.status,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
