//! Static files under the served directory.
//!
//! - **`directory`**: resolves request names to paths inside the root
//! - **`transfer`**: streams a file to the connection, optionally gzipped
//! - **`upload`**: stores a request body as a file

pub mod directory;
pub mod transfer;
pub mod upload;

pub use directory::ServedDirectory;
pub use transfer::{FileTransfer, TransferState};
