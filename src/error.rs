use thiserror::Error;

use crate::store::StoreError;

/// Error type for board lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The operation targets a name with no current record.
    #[error("Blackboard not found: {0}")]
    NotFound(String),
    /// `create` targets a name that is already present.
    #[error("Blackboard with name '{0}' already exists")]
    AlreadyExists(String),
    /// The store failed underneath the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BoardError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            BoardError::NotFound(_) => 404,
            BoardError::AlreadyExists(_) => 409,
            BoardError::Store(_) => 500,
        }
    }
}
