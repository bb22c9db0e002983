//! Integration tests for board lifecycle, expiry and locking.

mod support;
