//! InMemoryBoardStore - HashMap-backed board store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BoardStore, StoreError};
use crate::board::Board;

/// In-memory board store backed by a HashMap of JSON-encoded records.
///
/// Storage key is the board name. Clone-friendly via Arc: clones share the
/// same storage.
#[derive(Clone, Default)]
pub struct InMemoryBoardStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBoardStore {
    /// Create a new empty board store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn encode(board: &Board) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(board).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Board, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }
}

impl BoardStore for InMemoryBoardStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Board>, StoreError> {
        let storage = self.read()?;
        storage.get(name).map(|bytes| Self::decode(bytes)).transpose()
    }

    fn insert(&self, board: &Board) -> Result<Board, StoreError> {
        let bytes = Self::encode(board)?;
        let mut storage = self.write()?;

        if storage.contains_key(&board.name) {
            return Err(StoreError::Duplicate(board.name.clone()));
        }

        storage.insert(board.name.clone(), bytes);
        Ok(board.clone())
    }

    fn save(&self, board: &Board) -> Result<Board, StoreError> {
        let bytes = Self::encode(board)?;
        self.write()?.insert(board.name.clone(), bytes);
        Ok(board.clone())
    }

    fn delete(&self, board: &Board) -> Result<(), StoreError> {
        self.write()?.remove(&board.name);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Board>, StoreError> {
        let storage = self.read()?;
        let mut boards = storage
            .values()
            .map(|bytes| Self::decode(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        boards.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(boards)
    }
}
