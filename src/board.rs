//! Board - the named, expiring record managed by `BoardService`.

use serde::{Deserialize, Serialize};

/// Freshness of a board's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardStatus {
    Valid,
    Invalid,
}

/// A named, mutable record that becomes invalid once its TTL elapses
/// without a refresh.
///
/// `ttl_seconds == 0` means the board never expires. `last_updated` is in
/// milliseconds since the Unix epoch and never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub name: String,
    pub data: String,
    pub ttl_seconds: u64,
    pub last_updated: u64,
    pub status: BoardStatus,
}

impl Board {
    /// A fresh, empty, valid board.
    pub fn new(name: impl Into<String>, ttl_seconds: u64, now_ms: u64) -> Self {
        Board {
            name: name.into(),
            data: String::new(),
            ttl_seconds,
            last_updated: now_ms,
            status: BoardStatus::Valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == BoardStatus::Valid
    }

    /// Whether the TTL window has elapsed at `now_ms`, regardless of status.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.ttl_seconds > 0
            && now_ms.saturating_sub(self.last_updated) > self.ttl_seconds.saturating_mul(1000)
    }

    /// Whether the expiry sweep should move this board to `Invalid`.
    pub fn needs_invalidation(&self, now_ms: u64) -> bool {
        self.is_valid() && self.is_expired(now_ms)
    }

    /// Replace the content and start a new validity window.
    pub fn refresh(&mut self, data: impl Into<String>, now_ms: u64) {
        self.data = data.into();
        self.touch(now_ms);
        self.status = BoardStatus::Valid;
    }

    /// Empty the content and force the board invalid.
    pub fn clear(&mut self, now_ms: u64) {
        self.data.clear();
        self.touch(now_ms);
        self.status = BoardStatus::Invalid;
    }

    /// Mark the board invalid without touching content or timestamp.
    pub fn invalidate(&mut self) {
        self.status = BoardStatus::Invalid;
    }

    fn touch(&mut self, now_ms: u64) {
        self.last_updated = self.last_updated.max(now_ms);
    }
}
