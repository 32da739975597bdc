//! Wrapper owning one open native file handle.

use std::fmt;
use std::sync::Arc;

use gfs_native::{ConnectionId, FileId, NativeClient};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// One open file on the remote volume.
///
/// Cheaply cloneable: the session's resource tracker and the caller share
/// the same underlying handle, and whichever closes first wins. The native
/// file is released exactly once; further [`close`](FileHandle::close)
/// calls are no-ops, and dropping the last clone of a still-open handle
/// releases it as a backstop.
///
/// This layer manages the handle's lifetime only; I/O on the open file
/// belongs to higher layers.
#[derive(Clone)]
pub struct FileHandle {
    shared: Arc<Shared>,
}

struct Shared {
    client: Arc<dyn NativeClient>,
    // Taken on close; None means the native handle was already released.
    file: Mutex<Option<FileId>>,
    // Back-reference for diagnostics only, not an ownership edge.
    session: ConnectionId,
}

impl FileHandle {
    pub(crate) fn new(client: Arc<dyn NativeClient>, file: FileId, session: ConnectionId) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                file: Mutex::new(Some(file)),
                session,
            }),
        }
    }

    /// Connection this handle was opened under.
    pub fn session(&self) -> ConnectionId {
        self.shared.session
    }

    /// `true` until the first close.
    pub fn is_open(&self) -> bool {
        self.shared.file.lock().is_some()
    }

    /// Releases the native file. No-op after the first call; close
    /// failures are logged, never escalated.
    pub fn close(&self) {
        let Some(file) = self.shared.file.lock().take() else {
            return;
        };
        debug!(target = "gfs.handle", %file, session = %self.shared.session, "closing file");
        if let Err(err) = self.shared.client.close_file(file) {
            warn!(
                target = "gfs.handle",
                %file,
                session = %self.shared.session,
                error = %err,
                "close-file failed"
            );
        }
    }

    /// Identity comparison used by the tracker's duplicate guard.
    pub(crate) fn same_handle(&self, other: &FileHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("file", &*self.shared.file.lock())
            .field("session", &self.shared.session)
            .finish()
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        // Last clone gone without an explicit close.
        if let Some(file) = self.file.lock().take() {
            if let Err(err) = self.client.close_file(file) {
                warn!(
                    target = "gfs.handle",
                    %file,
                    session = %self.session,
                    error = %err,
                    "close-file failed during drop"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gfs_native::{Call, FakeClientBuilder};

    use super::*;

    fn open_handle(client: Arc<gfs_native::FakeClient>) -> FileHandle {
        let conn = client.open_session().unwrap();
        let file = client.open_file(conn, "aPath", 0).unwrap();
        FileHandle::new(client, file, conn)
    }

    #[test]
    fn close_releases_the_native_file_once() {
        let client = FakeClientBuilder::new().build();
        let handle = open_handle(client.clone());

        handle.close();
        handle.close();

        assert!(!handle.is_open());
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 1);
    }

    #[test]
    fn clones_share_the_close_state() {
        let client = FakeClientBuilder::new().build();
        let handle = open_handle(client.clone());
        let clone = handle.clone();

        clone.close();

        assert!(!handle.is_open());
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 1);
    }

    #[test]
    fn dropping_the_last_clone_closes_the_file() {
        let client = FakeClientBuilder::new().build();
        let handle = open_handle(client.clone());
        let clone = handle.clone();

        drop(handle);
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 0);

        drop(clone);
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 1);
    }

    #[test]
    fn drop_after_close_does_not_close_again() {
        let client = FakeClientBuilder::new().build();
        let handle = open_handle(client.clone());

        handle.close();
        drop(handle);

        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 1);
    }

    #[test]
    fn close_failure_still_marks_the_handle_closed() {
        let client = FakeClientBuilder::new().fail_close_file().build();
        let handle = open_handle(client.clone());

        handle.close();

        assert!(!handle.is_open());
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 1);
    }
}
