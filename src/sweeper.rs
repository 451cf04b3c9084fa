//! Background eviction of idle sessions.

use crate::session::SessionStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Periodically sweeps a [`SessionStore`] for inactive sessions.
pub struct Sweeper;

impl Sweeper {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// The first sweep runs one `interval` after spawning. The loop runs
    /// until [`SweeperHandle::stop`] is called.
    #[instrument(skip(store))]
    pub fn spawn(store: SessionStore, interval: Duration, timeout: Duration) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            info!(?interval, ?timeout, "Session sweeper started");
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {
                        let removed = store.sweep(store.now(), timeout);
                        if removed > 0 {
                            info!(removed, "Swept idle sessions");
                        } else {
                            debug!("Sweep found nothing to evict");
                        }
                    }
                }
            }
            info!("Session sweeper stopped");
        });

        SweeperHandle { cancel, task }
    }
}

/// Owner of a running sweeper.
///
/// Dropping the handle without calling [`stop`](Self::stop) cancels the
/// loop but does not wait for it.
#[derive(Debug)]
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Cancels the loop and waits for it to exit.
    #[instrument(skip(self))]
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "Sweeper task ended abnormally");
        }
    }

    /// Returns true while the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
