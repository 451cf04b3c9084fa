//! Strictly Chat Games library - checkers sessions for chat bots
//!
//! Wraps the [`strictly_dames`] engine in chat-scoped sessions.
//!
//! # Architecture
//!
//! - **Session**: one game per chat id, with per-session locking
//! - **Service**: start / move / inspect / quit operations
//! - **Sweeper**: background eviction of idle sessions
//! - **Command**: chat-line parsing and replies
//!
//! # Example
//!
//! ```
//! use strictly_chat_games::DamesService;
//!
//! let service = DamesService::default();
//! service.start("chat-42");
//!
//! // A6 -> B5, as zero-based (x, y) pairs.
//! let report = service.play_move("chat-42", (0, 5), (1, 4))?;
//! assert!(!report.is_terminal());
//! # Ok::<(), strictly_chat_games::ServiceError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod command;
mod config;
mod error;
mod service;
mod session;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, CommandError, Reply, dispatch, respond, split_chat};
pub use config::{ConfigError, DamesConfig};
pub use error::ServiceError;
pub use service::{DamesService, Inspection, MoveReport, StartReport};
pub use session::{GameSession, SessionHandle, SessionId, SessionStore};
pub use sweeper::{Sweeper, SweeperHandle};

pub use strictly_dames;
