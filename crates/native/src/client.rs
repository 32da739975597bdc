//! The capability the session layer consumes.

use crate::error::NativeError;
use crate::handle::{ConnectionId, FileId};
use crate::mode::Mode;

/// Contract of the native remote-filesystem client.
///
/// The session layer is written against this trait so that production code
/// can inject the real native binding while tests inject
/// [`FakeClient`](crate::FakeClient). Implementations are expected to be
/// blocking: every call delegates directly to the native library with no
/// cooperative suspension.
///
/// `close_session` and `close_file` are best-effort. Callers log a failure
/// and continue their teardown; they never retry against a handle that may
/// already be invalid on the native side.
pub trait NativeClient: Send + Sync {
    /// Establishes one connection to the remote volume.
    fn open_session(&self) -> Result<ConnectionId, NativeError>;

    /// Releases a connection previously returned by
    /// [`open_session`](NativeClient::open_session).
    fn close_session(&self, conn: ConnectionId) -> Result<(), NativeError>;

    /// Opens an existing file under `conn`.
    fn open_file(&self, conn: ConnectionId, path: &str, flags: u32) -> Result<FileId, NativeError>;

    /// Creates (and opens) a file under `conn` with the given permissions.
    fn create_file(
        &self,
        conn: ConnectionId,
        path: &str,
        flags: u32,
        mode: Mode,
    ) -> Result<FileId, NativeError>;

    /// Releases an open file.
    fn close_file(&self, file: FileId) -> Result<(), NativeError>;
}
