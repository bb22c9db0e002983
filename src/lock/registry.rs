use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use super::KeyLock;

/// Per-key mutual exclusion over an unbounded, dynamically discovered key space.
///
/// The registry lazily installs one `KeyLock` per contended key and removes it
/// again once the last holder releases it, so memory stays proportional to the
/// keys currently in use rather than every key ever touched.
///
/// Handles are only handed out while the internal map is locked. Removal
/// happens under that same lock and only when the map still points at the
/// releasing handle and nobody else holds a reference to it, so a contender
/// that fetched a handle but has not started waiting on it yet keeps the
/// entry alive.
pub struct LockRegistry {
    locks: Mutex<HashMap<String, Arc<KeyLock>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        LockRegistry {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire exclusivity for `key`, blocking until no other holder exists.
    pub fn acquire(&self, key: &str) -> LockGuard<'_> {
        let handle = self.handle(key);
        handle.lock();
        LockGuard {
            registry: self,
            key: key.to_string(),
            handle,
        }
    }

    /// Acquire exclusivity for `key` only if nobody holds it right now.
    pub fn try_acquire(&self, key: &str) -> Option<LockGuard<'_>> {
        let handle = self.handle(key);
        if !handle.try_lock() {
            return None;
        }
        Some(LockGuard {
            registry: self,
            key: key.to_string(),
            handle,
        })
    }

    /// Run `action` while holding exclusivity for `key`.
    ///
    /// The lock is released before the result is returned, including when
    /// the action returns an error or panics.
    pub fn with_exclusive<T, F>(&self, key: &str, action: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _guard = self.acquire(key);
        action()
    }

    /// Number of keys that currently have a lock entry.
    pub fn len(&self) -> usize {
        self.locks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locks().contains_key(key)
    }

    fn handle(&self, key: &str) -> Arc<KeyLock> {
        let mut locks = self.locks();
        Arc::clone(
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(KeyLock::new())),
        )
    }

    fn release(&self, key: &str, handle: &Arc<KeyLock>) {
        handle.unlock();

        // A queued contender won the race and now owns the entry.
        if !handle.try_lock() {
            return;
        }

        {
            let mut locks = self.locks();
            let registered = locks
                .get(key)
                .is_some_and(|current| Arc::ptr_eq(current, handle));
            // One reference in the map, one held by the releasing guard.
            if registered && Arc::strong_count(handle) == 2 {
                locks.remove(key);
                trace!(key, "reclaimed idle lock entry");
            }
        }

        handle.unlock();
    }

    fn locks(&self) -> MutexGuard<'_, HashMap<String, Arc<KeyLock>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped exclusivity for one key. Released exactly once, on drop.
pub struct LockGuard<'a> {
    registry: &'a LockRegistry,
    key: String,
    handle: Arc<KeyLock>,
}

impl LockGuard<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release exclusivity now instead of at the end of the scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.key, &self.handle);
    }
}
