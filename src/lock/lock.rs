use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Exclusive, non-reentrant lock handle for a single key.
///
/// Backed by `Mutex<bool>` + `Condvar` so that a holder can release and
/// re-try the lock from different call sites without keeping a guard alive.
/// The protected state is a plain flag, so a poisoned mutex is recovered
/// instead of surfaced.
pub struct KeyLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl KeyLock {
    pub fn new() -> Self {
        KeyLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    /// Acquire the lock, blocking until it becomes available.
    pub fn lock(&self) {
        let mut locked = self.state();
        while *locked {
            locked = self
                .wake
                .wait(locked)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *locked = true;
    }

    /// Try to acquire the lock without blocking.
    /// Returns `true` if acquired, `false` if already held.
    pub fn try_lock(&self) -> bool {
        let mut locked = self.state();
        if *locked {
            false
        } else {
            *locked = true;
            true
        }
    }

    /// Release the lock and wake one waiter.
    pub fn unlock(&self) {
        let mut locked = self.state();
        if *locked {
            *locked = false;
            self.wake.notify_one();
        }
    }

    pub fn is_locked(&self) -> bool {
        *self.state()
    }

    fn state(&self) -> MutexGuard<'_, bool> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for KeyLock {
    fn default() -> Self {
        Self::new()
    }
}
