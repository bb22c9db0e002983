//! Per-key exclusive locks.
//!
//! - `KeyLock` - a single blocking, non-reentrant lock handle
//! - `LockRegistry` - hands out one `KeyLock` per key and reclaims idle ones
//! - `LockGuard` - scoped exclusivity, released on drop

mod lock;
mod registry;

pub use lock::KeyLock;
pub use registry::{LockGuard, LockRegistry};
