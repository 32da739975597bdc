// gfs-native: contract between the safe session layer and the native
// remote-filesystem client.
//
// This crate carries no protocol logic of its own. It defines the opaque
// handle types the native layer hands out, the trait the session layer
// consumes, the permission-bit wire codec, and an in-memory fake client
// for unit testing the layers above without a real remote volume.

pub mod error;
pub mod fake;
pub mod flags;
pub mod handle;
pub mod mode;

mod client;

pub use client::NativeClient;
pub use error::NativeError;
pub use fake::{Call, FakeClient, FakeClientBuilder};
pub use handle::{ConnectionId, FileId};
pub use mode::Mode;
