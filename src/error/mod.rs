//! Error types.
//!
//! | Type | Raised by | Surfaced to the player |
//! |------|-----------|------------------------|
//! | [`NetworkError`] | HTTP transport / status | Yes, on the error screen |
//! | [`ApiError`] | backend client | Yes, for fetch and check |
//! | [`StorageError`] | session and player files | No, logged and swallowed |

mod api;
mod network;
mod storage;

pub use api::ApiError;
pub use network::NetworkError;
pub use storage::StorageError;
