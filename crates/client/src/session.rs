//! Session lifecycle over the native client.

use std::sync::Arc;

use gfs_native::{ConnectionId, FileId, Mode, NativeClient};
use tracing::{debug, warn};

use crate::diagnostics::{DiagnosticsChannel, TracingDiagnostics};
use crate::error::{Error, Result};
use crate::handle::FileHandle;
use crate::tracker::ResourceTracker;

/// Connection state. One-way: once `Closed`, a session never reconnects.
#[derive(Clone, Copy, Debug)]
enum State {
    Connected(ConnectionId),
    Closed,
}

/// One connection to the remote volume and every file opened under it.
///
/// Single-owner type: mutating operations take `&mut self` and the session
/// performs no internal locking of its own state. Callers that need shared
/// access must serialize externally, e.g. one mutex per session.
///
/// Dropping a session that was never explicitly closed runs the same
/// teardown as [`close`](Session::close): tracked handles are released,
/// the diagnostics channel is flushed and closed, and the native
/// connection is torn down. Explicit `close()` remains the expected path;
/// drop is the backstop for forgotten closes.
pub struct Session {
    client: Arc<dyn NativeClient>,
    diagnostics: Box<dyn DiagnosticsChannel>,
    tracker: ResourceTracker,
    state: State,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("live_handles", &self.tracker.live())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Connects with the default tracing-backed diagnostics channel.
    pub fn connect(client: Arc<dyn NativeClient>) -> Result<Self> {
        Self::connect_with_diagnostics(client, Box::new(TracingDiagnostics::new()))
    }

    /// Connects with an explicit diagnostics channel.
    pub fn connect_with_diagnostics(
        client: Arc<dyn NativeClient>,
        diagnostics: Box<dyn DiagnosticsChannel>,
    ) -> Result<Self> {
        let conn = client.open_session()?;
        debug!(target = "gfs.session", %conn, "session connected");
        let mut session = Self {
            client,
            diagnostics,
            tracker: ResourceTracker::new(),
            state: State::Connected(conn),
        };
        session.diagnostics.log(&format!("{conn} connected"));
        Ok(session)
    }

    /// Connection id while connected.
    pub fn id(&self) -> Option<ConnectionId> {
        match self.state {
            State::Connected(conn) => Some(conn),
            State::Closed => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected(_))
    }

    /// Number of tracked handles still open under this session.
    pub fn live_handles(&self) -> usize {
        self.tracker.live()
    }

    /// Opens an existing file and registers the handle with the tracker.
    ///
    /// Fails with [`Error::NotConnected`] once the session is closed;
    /// native rejections surface unchanged and register nothing.
    pub fn open(&mut self, path: &str, flags: u32) -> Result<FileHandle> {
        let conn = self.connected()?;
        let file = self.client.open_file(conn, path, flags)?;
        Ok(self.track(conn, file, path))
    }

    /// Creates a file, translating `mode_bits` to the native
    /// representation. Same tracking contract as [`open`](Session::open).
    pub fn create(&mut self, path: &str, flags: u32, mode_bits: u32) -> Result<FileHandle> {
        let conn = self.connected()?;
        let file = self
            .client
            .create_file(conn, path, flags, Mode::from_bits(mode_bits))?;
        Ok(self.track(conn, file, path))
    }

    /// Releases every tracked handle, closes the diagnostics channel
    /// (flushing), and tears down the native connection.
    ///
    /// Idempotent: calls after the first observe the closed state and have
    /// zero side effects. Teardown failures are logged and never prevent
    /// the transition to the terminal closed state.
    pub fn close(&mut self) {
        let State::Connected(conn) = self.state else {
            return;
        };
        // Terminal first: even a failing teardown must not leave the
        // session re-closable against an invalid native handle.
        self.state = State::Closed;

        self.tracker.close_resources();
        self.diagnostics.close(true);
        debug!(target = "gfs.session", %conn, "closing session");
        if let Err(err) = self.client.close_session(conn) {
            warn!(target = "gfs.session", %conn, error = %err, "close-session failed");
        }
    }

    fn connected(&self) -> Result<ConnectionId> {
        match self.state {
            State::Connected(conn) => Ok(conn),
            State::Closed => Err(Error::NotConnected),
        }
    }

    fn track(&mut self, conn: ConnectionId, file: FileId, path: &str) -> FileHandle {
        let handle = FileHandle::new(Arc::clone(&self.client), file, conn);
        self.tracker.allocated(&handle);
        self.diagnostics.log(&format!("{conn} opened {path} as {file}"));
        handle
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Backstop for owners that never called close(). Observes the
        // closed state and does nothing on the double-close path; teardown
        // failures were already logged and suppressed by close().
        self.close();
    }
}
