//! Session operations exposed to the chat dispatcher.
//!
//! [`DamesService`] is the only entry point the dispatcher uses: it resolves
//! the chat's session, runs the engine under that session's lock and hands
//! back plain report structs for rendering.

use crate::error::ServiceError;
use crate::session::{SessionId, SessionStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strictly_dames::{
    Board, CaptureCounts, Color, Coord, GameStatus, LastMove, MoveError, PieceCounts,
};
use tracing::{error, info, instrument, warn};

/// Snapshot returned when a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartReport {
    /// Chat id.
    pub session_id: SessionId,
    /// Opening position.
    pub board: Board,
    /// Color to move first.
    pub turn: Color,
}

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// Position after the move.
    pub board: Board,
    /// Color that moved.
    pub mover: Color,
    /// Color to move next. Equals `mover` once the game is over.
    pub turn: Color,
    /// Status after the move.
    pub status: GameStatus,
    /// Cell of the captured piece, for jumps.
    pub captured: Option<Coord>,
    /// Whether the moving man was crowned.
    pub promoted: bool,
}

impl MoveReport {
    /// Returns true if this move ended the game.
    pub fn is_terminal(&self) -> bool {
        !self.status.is_in_progress()
    }
}

/// Full view of a running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    /// Chat id.
    pub session_id: SessionId,
    /// Current position.
    pub board: Board,
    /// Color to move.
    pub turn: Color,
    /// Game status.
    pub status: GameStatus,
    /// Captures per color.
    pub captures: CaptureCounts,
    /// Moves played so far.
    pub move_count: u32,
    /// Pieces on the board by color and rank.
    pub pieces: PieceCounts,
    /// Most recent move.
    pub last_move: Option<LastMove>,
    /// When the game started.
    pub started_at: DateTime<Utc>,
    /// Whole seconds since the game started.
    pub elapsed_secs: u64,
}

/// Checkers sessions keyed by chat id.
#[derive(Debug, Clone, Default)]
pub struct DamesService {
    store: SessionStore,
}

impl DamesService {
    /// Creates a service over `store`.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The underlying store, for the sweeper.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Starts a fresh game in `id`, discarding any game already there.
    #[instrument(skip(self))]
    pub fn start(&self, id: &str) -> StartReport {
        let session = self.store.start(id);
        StartReport {
            session_id: session.id().clone(),
            board: session.game().board().clone(),
            turn: session.game().turn(),
        }
    }

    /// Plays a move in `id`. Coordinates are zero-based `(x, y)` pairs.
    ///
    /// A move that ends the game removes the session; later calls for `id`
    /// fail with [`ServiceError::NoActiveSession`] until a new game starts.
    #[instrument(skip(self))]
    pub fn play_move(
        &self,
        id: &str,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<MoveReport, ServiceError> {
        let from = to_coord(from)?;
        let to = to_coord(to)?;

        let handle = self.store.handle(id).ok_or(ServiceError::NoActiveSession)?;
        let mut session = handle.lock();
        if *session.retired() {
            warn!(session_id = id, "Move on a session that was already removed");
            return Err(ServiceError::SessionNotActive);
        }

        let outcome = match session.game_mut().play_move(from, to) {
            Ok(outcome) => outcome,
            Err(MoveError::Illegal(reason)) => return Err(ServiceError::IllegalMove(reason)),
            Err(MoveError::GameOver) => return Err(ServiceError::SessionNotActive),
            Err(MoveError::OutOfRange(e)) => {
                error!(session_id = id, error = %e, "Engine rejected a checked coordinate");
                return Err(ServiceError::OutOfRange(e));
            }
            Err(MoveError::InvariantViolation(description)) => {
                let removed = self.store.detach(&handle, &mut session);
                error!(session_id = id, %description, removed, "Dropped corrupted session");
                return Err(ServiceError::Corrupted(description));
            }
        };
        session.touch(self.store.now());

        let report = MoveReport {
            board: session.game().board().clone(),
            mover: outcome.mover,
            turn: session.game().turn(),
            status: outcome.status,
            captured: outcome.effects.captured,
            promoted: outcome.effects.promoted,
        };

        if report.is_terminal() {
            let removed = self.store.detach(&handle, &mut session);
            info!(session_id = id, status = %report.status, removed, "Game over, session closed");
        }
        Ok(report)
    }

    /// Reports the state of the game in `id`.
    #[instrument(skip(self))]
    pub fn inspect(&self, id: &str) -> Result<Inspection, ServiceError> {
        let session = self.store.get(id).ok_or(ServiceError::NoActiveSession)?;
        let now = self.store.now();
        let elapsed = now.signed_duration_since(*session.started_at());
        let elapsed_secs = u64::try_from(elapsed.num_seconds()).unwrap_or(0);
        let game = session.game();

        Ok(Inspection {
            session_id: session.id().clone(),
            board: game.board().clone(),
            turn: game.turn(),
            status: game.status(),
            captures: game.captures(),
            move_count: game.move_count(),
            pieces: game.board().count_pieces(),
            last_move: game.last_move(),
            started_at: *session.started_at(),
            elapsed_secs,
        })
    }

    /// Ends the game in `id`. Returns false if there was none.
    #[instrument(skip(self))]
    pub fn quit(&self, id: &str) -> bool {
        self.store.remove(id)
    }
}

fn to_coord((x, y): (i32, i32)) -> Result<Coord, ServiceError> {
    Coord::new(x, y).map_err(|e| {
        error!(error = %e, "Caller passed an off-board coordinate");
        ServiceError::OutOfRange(e)
    })
}
