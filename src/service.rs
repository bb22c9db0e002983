//! BoardService - lifecycle operations on boards, each under the board's lock.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::clock::{Clock, SystemClock};
use crate::error::BoardError;
use crate::lock::LockRegistry;
use crate::store::{BoardStore, StoreError};

/// Outcome of a single expiry sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    /// Boards in the snapshot that were examined.
    pub scanned: usize,
    /// Boards moved from `Valid` to `Invalid`.
    pub invalidated: usize,
    /// Boards whose evaluation failed; they are re-evaluated next sweep.
    pub failed: usize,
}

/// Create, read, update, clear and delete boards by name, and expire stale ones.
///
/// Every read-modify-write of a board record runs while holding that board's
/// exclusive lock from the internal `LockRegistry`, so operations on the same
/// name are serialized while different names proceed in parallel.
///
/// `list_all`, `delete_all` and `sweep_expired` work over a point-in-time
/// snapshot and are not atomic as a whole: boards created or deleted
/// concurrently may or may not be reflected.
pub struct BoardService<S, C = SystemClock> {
    store: S,
    clock: C,
    locks: LockRegistry,
}

impl<S: BoardStore> BoardService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: BoardStore, C: Clock> BoardService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        BoardService {
            store,
            clock,
            locks: LockRegistry::new(),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Access the per-board lock registry.
    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// Create an empty, valid board. Fails if the name is already taken.
    pub fn create(&self, name: &str, ttl_seconds: u64) -> Result<Board, BoardError> {
        self.locks.with_exclusive(name, || {
            if self.store.find_by_name(name)?.is_some() {
                return Err(BoardError::AlreadyExists(name.to_string()));
            }

            let board = Board::new(name, ttl_seconds, self.clock.now_ms());
            let board = self.store.insert(&board).map_err(|e| match e {
                StoreError::Duplicate(_) => BoardError::AlreadyExists(name.to_string()),
                other => other.into(),
            })?;

            debug!(board = %name, ttl_seconds, "board created");
            Ok(board)
        })
    }

    /// Display new data on a board, making it valid again.
    pub fn refresh(&self, name: &str, data: &str) -> Result<Board, BoardError> {
        self.locks.with_exclusive(name, || {
            let mut board = self.find(name)?;
            board.refresh(data, self.clock.now_ms());
            let board = self.store.save(&board)?;

            debug!(board = %name, len = data.len(), "board refreshed");
            Ok(board)
        })
    }

    /// Empty a board and mark it invalid, regardless of its remaining TTL.
    pub fn clear(&self, name: &str) -> Result<Board, BoardError> {
        self.locks.with_exclusive(name, || {
            let mut board = self.find(name)?;
            board.clear(self.clock.now_ms());
            let board = self.store.save(&board)?;

            debug!(board = %name, "board cleared");
            Ok(board)
        })
    }

    pub fn read(&self, name: &str) -> Result<Board, BoardError> {
        self.locks.with_exclusive(name, || self.find(name))
    }

    pub fn delete(&self, name: &str) -> Result<(), BoardError> {
        self.locks.with_exclusive(name, || {
            let board = self.find(name)?;
            self.store.delete(&board)?;

            debug!(board = %name, "board deleted");
            Ok(())
        })
    }

    /// Snapshot of every board. No per-board lock is held while enumerating.
    pub fn list_all(&self) -> Result<Vec<Board>, BoardError> {
        Ok(self.store.find_all()?)
    }

    /// Delete every board in a snapshot, each under its own lock.
    ///
    /// Boards deleted concurrently are skipped. Returns how many boards this
    /// call removed.
    pub fn delete_all(&self) -> Result<usize, BoardError> {
        let mut deleted = 0;
        for board in self.store.find_all()? {
            match self.delete(&board.name) {
                Ok(()) => deleted += 1,
                Err(BoardError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        debug!(deleted, "deleted all boards");
        Ok(deleted)
    }

    /// Run one expiry pass: move every valid board whose TTL has elapsed to
    /// `Invalid`.
    ///
    /// Each board is re-read under its lock before being judged, so a
    /// concurrent refresh is never overwritten. Boards that fail to persist
    /// are counted and left for the next sweep.
    pub fn sweep_expired(&self) -> Result<SweepStats, BoardError> {
        let snapshot = self.store.find_all()?;
        let mut stats = SweepStats {
            scanned: snapshot.len(),
            ..SweepStats::default()
        };

        for candidate in snapshot {
            let name = candidate.name;
            let outcome = self.locks.with_exclusive(&name, || -> Result<bool, StoreError> {
                let Some(mut board) = self.store.find_by_name(&name)? else {
                    return Ok(false);
                };
                if !board.needs_invalidation(self.clock.now_ms()) {
                    return Ok(false);
                }
                board.invalidate();
                self.store.save(&board)?;
                Ok(true)
            });

            match outcome {
                Ok(true) => {
                    stats.invalidated += 1;
                    info!(board = %name, "board expired");
                }
                Ok(false) => {}
                Err(e) => {
                    stats.failed += 1;
                    warn!(board = %name, error = %e, "failed to expire board");
                }
            }
        }

        Ok(stats)
    }

    fn find(&self, name: &str) -> Result<Board, BoardError> {
        self.store
            .find_by_name(name)?
            .ok_or_else(|| BoardError::NotFound(name.to_string()))
    }
}
