//! Error surface of the session layer.

use thiserror::Error;

/// Errors returned by [`Session`](crate::Session) operations.
///
/// Native rejections (`OpenFailed`, `CreateFailed`, ...) pass through
/// unchanged; only the closed-state guard is added at this layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The session already reached its terminal closed state.
    #[error("session is not connected")]
    NotConnected,

    #[error(transparent)]
    Native(#[from] gfs_native::NativeError),
}

pub type Result<T> = std::result::Result<T, Error>;
