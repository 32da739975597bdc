// gfs: safe session and file-handle lifecycle layer over a native
// remote-filesystem client.
//
// The filesystem protocol itself lives behind the `NativeClient` trait in
// `gfs-native`. This crate guarantees that every handle opened through a
// session is released exactly once, whether the owner closes explicitly or
// simply drops the session.

pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod session;
pub mod tracker;

pub use diagnostics::{DiagnosticsChannel, TracingDiagnostics};
pub use error::{Error, Result};
pub use handle::FileHandle;
pub use session::Session;
pub use tracker::ResourceTracker;

pub use gfs_native::{ConnectionId, FileId, Mode, NativeClient, flags};
