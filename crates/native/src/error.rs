//! Failure taxonomy of the native client contract.

use thiserror::Error;

/// Errors signalled by a [`NativeClient`](crate::NativeClient)
/// implementation.
///
/// `CloseFailed` is best-effort territory: callers log it and finish their
/// teardown sequence rather than retrying against an already-invalid
/// handle.
#[derive(Debug, Error)]
pub enum NativeError {
    #[error("failed to connect to the remote volume: {reason}")]
    ConnectFailed { reason: String },

    #[error("failed to open {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("failed to create {path}: {reason}")]
    CreateFailed { path: String, reason: String },

    #[error("close failed: {reason}")]
    CloseFailed { reason: String },
}
