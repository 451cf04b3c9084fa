//! Errors reported by the session service.

use derive_more::{Display, From};
use strictly_dames::{OutOfRangeError, Rejection};

/// Failure of a session operation.
///
/// `NoActiveSession`, `IllegalMove` and `SessionNotActive` are user errors
/// and leave every session untouched. `OutOfRange` means the caller handed
/// over a coordinate it should never have produced; `Corrupted` means a move
/// broke an engine invariant and the session was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum ServiceError {
    /// No game has been started for this chat.
    #[display("No active game in this chat")]
    NoActiveSession,

    /// The move failed validation.
    #[display("Illegal move: {}", _0)]
    #[from]
    IllegalMove(Rejection),

    /// The game already ended.
    #[display("The game is over")]
    SessionNotActive,

    /// A coordinate was outside the board.
    #[display("{}", _0)]
    #[from]
    OutOfRange(OutOfRangeError),

    /// A move left the game inconsistent; the session was dropped.
    #[display("Session corrupted: {}", _0)]
    Corrupted(String),
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Returns true for errors caused by the player rather than the host.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ServiceError::NoActiveSession
                | ServiceError::IllegalMove(_)
                | ServiceError::SessionNotActive
        )
    }
}
