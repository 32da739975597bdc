//! Fake native client for unit testing the session layer without a real
//! remote volume.
//!
//! Records every native call so tests can assert exactly which operations
//! ran and how often, and lets tests script handle values and inject
//! failures per operation.
//!
//! # Example
//!
//! ```ignore
//! let client = FakeClientBuilder::new().session_id(1).first_file_id(2).build();
//! let mut session = Session::connect(client.clone())?;
//! let file = session.open("aPath", 0)?;
//!
//! assert!(client.calls().contains(&Call::OpenFile {
//!     conn: ConnectionId::new(1),
//!     path: "aPath".into(),
//!     flags: 0,
//! }));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::NativeClient;
use crate::error::NativeError;
use crate::handle::{ConnectionId, FileId};
use crate::mode::Mode;

/// One recorded native call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenSession,
    CloseSession(ConnectionId),
    OpenFile {
        conn: ConnectionId,
        path: String,
        flags: u32,
    },
    CreateFile {
        conn: ConnectionId,
        path: String,
        flags: u32,
        mode: Mode,
    },
    CloseFile(FileId),
}

/// Builder for [`FakeClient`] instances.
pub struct FakeClientBuilder {
    session_id: u64,
    first_file_id: u64,
    fail_connect: bool,
    fail_open: bool,
    fail_create: bool,
    fail_close_session: bool,
    fail_close_file: bool,
}

impl FakeClientBuilder {
    pub fn new() -> Self {
        Self {
            session_id: 1,
            first_file_id: 2,
            fail_connect: false,
            fail_open: false,
            fail_create: false,
            fail_close_session: false,
            fail_close_file: false,
        }
    }

    /// Connection id handed out by `open_session`.
    pub fn session_id(mut self, raw: u64) -> Self {
        self.session_id = raw;
        self
    }

    /// File id handed out by the first open/create; later calls count up
    /// from here.
    pub fn first_file_id(mut self, raw: u64) -> Self {
        self.first_file_id = raw;
        self
    }

    /// Makes `open_session` fail with `ConnectFailed`.
    pub fn fail_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Makes `open_file` fail with `OpenFailed`.
    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Makes `create_file` fail with `CreateFailed`.
    pub fn fail_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Makes `close_session` report `CloseFailed`.
    pub fn fail_close_session(mut self) -> Self {
        self.fail_close_session = true;
        self
    }

    /// Makes `close_file` report `CloseFailed`.
    pub fn fail_close_file(mut self) -> Self {
        self.fail_close_file = true;
        self
    }

    pub fn build(self) -> Arc<FakeClient> {
        Arc::new(FakeClient {
            session_id: self.session_id,
            next_file_id: Mutex::new(self.first_file_id),
            fail_connect: self.fail_connect,
            fail_open: self.fail_open,
            fail_create: self.fail_create,
            fail_close_session: self.fail_close_session,
            fail_close_file: self.fail_close_file,
            calls: Mutex::new(Vec::new()),
        })
    }
}

impl Default for FakeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory [`NativeClient`] that records calls instead of talking to a
/// native library.
pub struct FakeClient {
    session_id: u64,
    next_file_id: Mutex<u64>,
    fail_connect: bool,
    fail_open: bool,
    fail_create: bool,
    fail_close_session: bool,
    fail_close_file: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    /// All recorded calls in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|&call| predicate(call)).count()
    }

    /// Take all recorded calls, clearing the buffer.
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock())
    }

    fn next_file_id(&self) -> FileId {
        let mut next = self.next_file_id.lock();
        let id = FileId::new(*next);
        *next += 1;
        id
    }
}

impl NativeClient for FakeClient {
    fn open_session(&self) -> Result<ConnectionId, NativeError> {
        self.calls.lock().push(Call::OpenSession);
        if self.fail_connect {
            return Err(NativeError::ConnectFailed {
                reason: "scripted connect failure".into(),
            });
        }
        Ok(ConnectionId::new(self.session_id))
    }

    fn close_session(&self, conn: ConnectionId) -> Result<(), NativeError> {
        self.calls.lock().push(Call::CloseSession(conn));
        if self.fail_close_session {
            return Err(NativeError::CloseFailed {
                reason: "scripted close-session failure".into(),
            });
        }
        Ok(())
    }

    fn open_file(&self, conn: ConnectionId, path: &str, flags: u32) -> Result<FileId, NativeError> {
        self.calls.lock().push(Call::OpenFile {
            conn,
            path: path.to_string(),
            flags,
        });
        if self.fail_open {
            return Err(NativeError::OpenFailed {
                path: path.to_string(),
                reason: "scripted open failure".into(),
            });
        }
        Ok(self.next_file_id())
    }

    fn create_file(
        &self,
        conn: ConnectionId,
        path: &str,
        flags: u32,
        mode: Mode,
    ) -> Result<FileId, NativeError> {
        self.calls.lock().push(Call::CreateFile {
            conn,
            path: path.to_string(),
            flags,
            mode,
        });
        if self.fail_create {
            return Err(NativeError::CreateFailed {
                path: path.to_string(),
                reason: "scripted create failure".into(),
            });
        }
        Ok(self.next_file_id())
    }

    fn close_file(&self, file: FileId) -> Result<(), NativeError> {
        self.calls.lock().push(Call::CloseFile(file));
        if self.fail_close_file {
            return Err(NativeError::CloseFailed {
                reason: "scripted close-file failure".into(),
            });
        }
        Ok(())
    }
}
