//! Chat-scoped game sessions.
//!
//! Every chat holds at most one game. Sessions live in a [`DashMap`] keyed by
//! chat id; each value is an `Arc<Mutex<GameSession>>` so a move can lock
//! its own session without holding the map. Removal always locks the session
//! first and then drops the map entry only if it still points at the same
//! handle, so a removal can never take out a game started after it looked.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use derive_getters::Getters;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use strictly_dames::Game;
use tracing::{debug, info, instrument};

/// Unique identifier for a chat session.
pub type SessionId = String;

/// Shared, lockable handle to one session.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// One game bound to a chat.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Chat id.
    id: SessionId,
    /// The game state.
    game: Game,
    /// When the game was started.
    started_at: DateTime<Utc>,
    /// When the last successful move was played.
    last_activity: DateTime<Utc>,
    /// Set once the session has been dropped from the store.
    retired: bool,
}

impl GameSession {
    /// Binds `game` to `id`, starting at `now`.
    #[instrument(skip(game, now))]
    pub fn new(id: SessionId, game: Game, now: DateTime<Utc>) -> Self {
        debug!(session_id = %id, "Creating new game session");
        Self {
            id,
            game,
            started_at: now,
            last_activity: now,
            retired: false,
        }
    }

    /// Mutable access to the game.
    pub(crate) fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Records activity at `now`.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// Time since the last move, measured at `now`.
    pub fn idle_for(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.last_activity)
    }
}

/// Registry of live sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SessionHandle>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates an empty store reading time from `clock`.
    #[instrument(skip(clock))]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        info!("Creating session store");
        Self {
            sessions: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns a snapshot of the session for `id`, if any.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Option<GameSession> {
        let handle = self.handle(id)?;
        let session = handle.lock().clone();
        Some(session)
    }

    /// Returns the lockable handle for `id`, if any.
    pub fn handle(&self, id: &str) -> Option<SessionHandle> {
        let handle = self.sessions.get(id).map(|entry| Arc::clone(entry.value()));
        if handle.is_none() {
            debug!(session_id = id, "Session not found");
        }
        handle
    }

    /// Starts a new game for `id`, replacing any game already there.
    pub fn start(&self, id: &str) -> GameSession {
        self.start_with(id, Game::new())
    }

    /// Starts `game` in `id`, replacing any game already there.
    #[instrument(skip(self, game))]
    pub fn start_with(&self, id: &str, game: Game) -> GameSession {
        let session = GameSession::new(id.to_string(), game, self.now());
        let snapshot = session.clone();
        let previous = self
            .sessions
            .insert(id.to_string(), Arc::new(Mutex::new(session)));

        if let Some(previous) = previous {
            previous.lock().retired = true;
            info!(session_id = id, "Replaced existing session");
        } else {
            info!(session_id = id, "Started session");
        }
        snapshot
    }

    /// Removes the session for `id`. Returns false if there was none.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> bool {
        let Some(handle) = self.handle(id) else {
            return false;
        };
        let mut session = handle.lock();
        let removed = self.detach(&handle, &mut session);
        if removed {
            info!(session_id = id, "Removed session");
        }
        removed
    }

    /// Drops `handle` from the map while its lock is held by the caller.
    ///
    /// Leaves the map alone if `id` now refers to a different session.
    pub(crate) fn detach(&self, handle: &SessionHandle, session: &mut GameSession) -> bool {
        session.retired = true;
        self.sessions
            .remove_if(&session.id, |_, current| Arc::ptr_eq(current, handle))
            .is_some()
    }

    /// Removes every session idle for longer than `timeout` at `now`.
    ///
    /// Returns the number of sessions removed.
    #[instrument(skip(self, now))]
    pub fn sweep(&self, now: DateTime<Utc>, timeout: Duration) -> usize {
        let timeout = TimeDelta::from_std(timeout).unwrap_or(TimeDelta::MAX);
        let handles: Vec<SessionHandle> = self
            .sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut removed = 0;
        for handle in handles {
            let mut session = handle.lock();
            if session.retired {
                continue;
            }
            let idle = session.idle_for(now);
            if idle > timeout && self.detach(&handle, &mut session) {
                info!(
                    session_id = %session.id,
                    idle_secs = idle.num_seconds(),
                    "Evicted inactive session"
                );
                removed += 1;
            }
        }

        debug!(removed, remaining = self.sessions.len(), "Sweep finished");
        removed
    }

    /// Lists all live session ids.
    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
