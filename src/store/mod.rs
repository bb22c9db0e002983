//! Board persistence.
//!
//! `BoardStore` is the boundary to whatever keeps board records durable
//! (a document store, a KV store, ...). `InMemoryBoardStore` is the
//! HashMap-backed implementation used for tests and single-process setups.
//!
//! Stores do no locking of their own beyond what keeps their internal
//! structures sound; per-board exclusivity is the caller's job.

mod in_memory;

use thiserror::Error;

use crate::board::Board;

pub use in_memory::InMemoryBoardStore;

/// Error type for board store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `insert` targeted a name that already has a record.
    #[error("board already stored: {0}")]
    Duplicate(String),
    /// Serialization/deserialization error.
    #[error("board serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("board storage error: {0}")]
    Storage(String),
}

/// Keyed persistence for boards.
pub trait BoardStore: Send + Sync {
    /// Look a board up by name. Returns None if not found.
    fn find_by_name(&self, name: &str) -> Result<Option<Board>, StoreError>;

    /// Insert a new board. Fails with `StoreError::Duplicate` if the name exists.
    fn insert(&self, board: &Board) -> Result<Board, StoreError>;

    /// Insert or overwrite a board.
    fn save(&self, board: &Board) -> Result<Board, StoreError>;

    /// Remove a board's record. Removing a missing record is not an error.
    fn delete(&self, board: &Board) -> Result<(), StoreError>;

    /// Point-in-time snapshot of every stored board.
    fn find_all(&self) -> Result<Vec<Board>, StoreError>;
}
