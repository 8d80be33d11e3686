//! Uniform error shape for backend calls.

use sc_protocol::stage_models::BackendOperation;
use thiserror::Error;

/// A failed backend call.
///
/// `status` is the HTTP status when a response was received, and `None` for
/// transport failures (connection refused, DNS, timeout).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub status: Option<u16>,
    pub message: String,
}

impl BackendError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Failure without a usable body: the operation's generic message.
    pub fn fallback(operation: BackendOperation, status: Option<u16>) -> Self {
        Self::new(status, operation.fallback_message())
    }

    /// A successful response that lacks a field the caller depends on.
    pub fn missing_field(operation: BackendOperation, field: &str) -> Self {
        Self::new(
            None,
            format!("Unexpected response from {operation}: missing `{field}`"),
        )
    }

    /// A file list naming the same file twice.
    pub fn duplicate_file(operation: BackendOperation, name: &str) -> Self {
        Self::new(
            None,
            format!("Unexpected response from {operation}: duplicate file name `{name}`"),
        )
    }
}

/// Type alias for Result with BackendError.
pub type BackendResult<T> = Result<T, BackendError>;
