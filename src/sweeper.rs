//! Background thread that periodically expires stale boards.

use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::service::BoardService;
use crate::store::BoardStore;

/// Statistics accumulated by the sweeper thread.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweeperStats {
    /// Number of sweeps run.
    pub ticks: usize,
    /// Boards moved to `Invalid` across all sweeps.
    pub invalidated: usize,
    /// Board evaluations or snapshots that failed.
    pub failed: usize,
}

/// A background thread that calls `BoardService::sweep_expired` on a fixed
/// interval until stopped.
///
/// ## Example
///
/// ```ignore
/// use std::sync::Arc;
/// use blackboard::{BoardService, ExpirySweeper, InMemoryBoardStore};
///
/// let service = Arc::new(BoardService::new(InMemoryBoardStore::new()));
/// let sweeper = ExpirySweeper::spawn(service.clone(), config.sweep_interval());
///
/// // ... serve requests ...
///
/// let stats = sweeper.stop();
/// ```
pub struct ExpirySweeper {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<SweeperStats>>,
}

impl ExpirySweeper {
    /// Spawn the sweeper. The first sweep runs immediately, then one per `interval`.
    pub fn spawn<S, C>(service: Arc<BoardService<S, C>>, interval: Duration) -> Self
    where
        S: BoardStore + 'static,
        C: Clock + 'static,
    {
        let (stop_tx, stop_rx) = channel();

        let handle = thread::spawn(move || {
            let mut stats = SweeperStats::default();

            loop {
                stats.ticks += 1;

                match service.sweep_expired() {
                    Ok(sweep) => {
                        stats.invalidated += sweep.invalidated;
                        stats.failed += sweep.failed;
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!(error = %e, "expiry sweep could not list boards");
                    }
                }

                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }

            debug!(ticks = stats.ticks, "expiry sweeper stopped");
            stats
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the sweeper to stop and wait for it to finish.
    /// Returns the accumulated statistics.
    pub fn stop(mut self) -> SweeperStats {
        let _ = self.stop_tx.send(());
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    }

    /// Signal the sweeper to stop without waiting.
    pub fn signal_stop(&self) {
        let _ = self.stop_tx.send(());
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}
