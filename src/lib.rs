//! Named, expiring shared boards.
//!
//! A [`BoardService`] creates, refreshes, clears, reads and deletes boards by
//! name. Each operation runs under a per-name lock handed out by a
//! [`LockRegistry`], which reclaims the lock once nobody is using that name.
//! An [`ExpirySweeper`] thread periodically moves boards whose TTL has
//! elapsed to [`BoardStatus::Invalid`].
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blackboard::{BoardConfig, BoardService, ExpirySweeper, InMemoryBoardStore};
//!
//! let config = BoardConfig::default();
//! let service = Arc::new(BoardService::new(InMemoryBoardStore::new()));
//! let sweeper = ExpirySweeper::spawn(service.clone(), config.sweep_interval());
//!
//! service.create("lobby", 30)?;
//! service.refresh("lobby", "standup at 10")?;
//! let board = service.read("lobby")?;
//!
//! sweeper.stop();
//! ```

mod board;
mod clock;
mod config;
mod error;
mod service;
mod store;
mod sweeper;
mod validation;

pub mod lock;

#[cfg(feature = "http")]
pub mod http;

pub use board::{Board, BoardStatus};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, ConfigError};
pub use error::BoardError;
pub use lock::{KeyLock, LockGuard, LockRegistry};
pub use service::{BoardService, SweepStats};
pub use store::{BoardStore, InMemoryBoardStore, StoreError};
pub use sweeper::{ExpirySweeper, SweeperStats};
pub use validation::{CreateBoardRequest, DisplayDataRequest, ValidationError, Validator};
