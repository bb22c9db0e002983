//! Request shapes and their validation, applied before calling `BoardService`.

use serde::Deserialize;
use thiserror::Error;

use crate::config::BoardConfig;

/// Field-level validation failures, each formatted as `"field: message"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .details.join(", "))]
pub struct ValidationError {
    pub details: Vec<String>,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    #[serde(default)]
    pub name: String,
    /// Signed so that negative input can be reported as a validation error.
    #[serde(default)]
    pub ttl_seconds: i64,
}

/// Body of a display (refresh) request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayDataRequest {
    #[serde(default)]
    pub data: String,
}

/// Length and range checks for incoming requests.
#[derive(Debug, Clone)]
pub struct Validator {
    name_min_len: usize,
    name_max_len: usize,
    data_max_len: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

impl Validator {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            name_min_len: config.name_min_len,
            name_max_len: config.name_max_len,
            data_max_len: config.data_max_len,
        }
    }

    /// Validate a create request, returning the TTL as an unsigned value.
    pub fn create(&self, request: &CreateBoardRequest) -> Result<u64, ValidationError> {
        let mut details = Vec::new();

        if request.name.trim().is_empty() {
            details.push("name: Name should not be blank".to_string());
        }
        let len = request.name.chars().count();
        if !(self.name_min_len..=self.name_max_len).contains(&len) {
            details.push(format!(
                "name: Name should be between {} and {} characters",
                self.name_min_len, self.name_max_len
            ));
        }
        if request.ttl_seconds < 0 {
            details.push("ttlSeconds: Validity should be positive or zero".to_string());
        }

        if details.is_empty() {
            Ok(request.ttl_seconds.unsigned_abs())
        } else {
            Err(ValidationError { details })
        }
    }

    pub fn display(&self, request: &DisplayDataRequest) -> Result<(), ValidationError> {
        let mut details = Vec::new();

        if request.data.trim().is_empty() {
            details.push("data: Data should not be blank".to_string());
        }
        let len = request.data.chars().count();
        if !(1..=self.data_max_len).contains(&len) {
            details.push(format!(
                "data: Data should be between 1 and {} characters",
                self.data_max_len
            ));
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { details })
        }
    }
}
