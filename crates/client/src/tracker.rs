//! Bookkeeping set of live file handles belonging to one session.

use parking_lot::Mutex;
use tracing::debug;

use crate::handle::FileHandle;

/// Tracks every handle opened under a session until the session closes.
///
/// The set is identity-keyed: two clones of the same handle count as one
/// entry. Insertion order is irrelevant.
#[derive(Default)]
pub struct ResourceTracker {
    live: Mutex<Vec<FileHandle>>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly opened handle. Duplicate registration of the
    /// same handle is a defensive no-op.
    pub fn allocated(&self, handle: &FileHandle) {
        let mut live = self.live.lock();
        if live.iter().any(|tracked| tracked.same_handle(handle)) {
            return;
        }
        live.push(handle.clone());
    }

    /// Closes and forgets every tracked handle. Callable any number of
    /// times; draining an already-empty tracker is a no-op.
    pub fn close_resources(&self) {
        let drained: Vec<FileHandle> = std::mem::take(&mut *self.live.lock());
        if drained.is_empty() {
            return;
        }
        debug!(target = "gfs.tracker", count = drained.len(), "closing tracked handles");
        for handle in drained {
            // Individual close failures are logged by the handle and must
            // not abort the drain.
            handle.close();
        }
    }

    /// Number of still-tracked handles.
    pub fn live(&self) -> usize {
        self.live.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gfs_native::{Call, FakeClient, FakeClientBuilder, NativeClient};

    use super::*;

    fn open_handle(client: &Arc<FakeClient>) -> FileHandle {
        let conn = client.open_session().unwrap();
        let file = client.open_file(conn, "aPath", 0).unwrap();
        FileHandle::new(client.clone(), file, conn)
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let client = FakeClientBuilder::new().build();
        let tracker = ResourceTracker::new();
        let handle = open_handle(&client);

        tracker.allocated(&handle);
        tracker.allocated(&handle);
        tracker.allocated(&handle.clone());

        assert_eq!(tracker.live(), 1);
    }

    #[test]
    fn close_resources_closes_and_drains_everything() {
        let client = FakeClientBuilder::new().build();
        let tracker = ResourceTracker::new();
        let first = open_handle(&client);
        let second = open_handle(&client);
        tracker.allocated(&first);
        tracker.allocated(&second);

        tracker.close_resources();

        assert_eq!(tracker.live(), 0);
        assert!(!first.is_open());
        assert!(!second.is_open());
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 2);
    }

    #[test]
    fn draining_an_empty_tracker_is_a_no_op() {
        let tracker = ResourceTracker::new();
        tracker.close_resources();
        tracker.close_resources();
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn second_drain_closes_nothing_further() {
        let client = FakeClientBuilder::new().build();
        let tracker = ResourceTracker::new();
        let handle = open_handle(&client);
        tracker.allocated(&handle);

        tracker.close_resources();
        tracker.close_resources();

        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 1);
    }

    #[test]
    fn one_close_failure_does_not_abort_the_drain() {
        let client = FakeClientBuilder::new().fail_close_file().build();
        let tracker = ResourceTracker::new();
        let first = open_handle(&client);
        let second = open_handle(&client);
        tracker.allocated(&first);
        tracker.allocated(&second);

        tracker.close_resources();

        assert_eq!(tracker.live(), 0);
        assert_eq!(client.count(|call| matches!(call, Call::CloseFile(_))), 2);
    }
}
