use std::collections::HashSet;
use std::sync::{Arc, Mutex};

type Hook = Box<dyn FnOnce() + Send>;

use blackboard::{Board, BoardStore, InMemoryBoardStore, StoreError};

/// Store wrapper whose `save` can be made to fail for chosen board names.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: InMemoryBoardStore,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_saves_for(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }
}

impl BoardStore for FlakyStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Board>, StoreError> {
        self.inner.find_by_name(name)
    }

    fn insert(&self, board: &Board) -> Result<Board, StoreError> {
        self.inner.insert(board)
    }

    fn save(&self, board: &Board) -> Result<Board, StoreError> {
        if self.failing.lock().unwrap().contains(&board.name) {
            return Err(StoreError::Storage(format!("save of {} refused", board.name)));
        }
        self.inner.save(board)
    }

    fn delete(&self, board: &Board) -> Result<(), StoreError> {
        self.inner.delete(board)
    }

    fn find_all(&self) -> Result<Vec<Board>, StoreError> {
        self.inner.find_all()
    }
}

/// Store wrapper that runs a one-shot hook right after `find_all` has taken
/// its snapshot, before the caller sees it.
#[derive(Clone, Default)]
pub struct HookedStore {
    inner: InMemoryBoardStore,
    after_find_all: Arc<Mutex<Option<Hook>>>,
}

impl HookedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_next_find_all(&self, hook: impl FnOnce() + Send + 'static) {
        *self.after_find_all.lock().unwrap() = Some(Box::new(hook));
    }
}

impl BoardStore for HookedStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Board>, StoreError> {
        self.inner.find_by_name(name)
    }

    fn insert(&self, board: &Board) -> Result<Board, StoreError> {
        self.inner.insert(board)
    }

    fn save(&self, board: &Board) -> Result<Board, StoreError> {
        self.inner.save(board)
    }

    fn delete(&self, board: &Board) -> Result<(), StoreError> {
        self.inner.delete(board)
    }

    fn find_all(&self) -> Result<Vec<Board>, StoreError> {
        let snapshot = self.inner.find_all()?;
        let hook = self.after_find_all.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(snapshot)
    }
}
