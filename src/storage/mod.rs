//! Device-local key-value storage for the authentication token.
//!
//! The session only ever touches a couple of keys. Backends store opaque
//! strings and know nothing about tokens or users.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing the store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value store.
///
/// A missing key is `Ok(None)`, never an error. Deleting a missing key
/// succeeds.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn delete(&self, key: &str) -> Result<(), StorageError>;
}
