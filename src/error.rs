//! Error types for NFT list operations
//!
//! Storage failures are kept separate so the persistence layer can recover
//! from read errors locally while write errors still reach the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Bookmarked item cannot be moved: {0}")]
    BookmarkedItemLocked(String),

    #[error("No NFT list has been loaded yet")]
    NothingLoaded,

    #[error("NFT source error: {0}")]
    Source(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl ViewerError {
    /// Create an out-of-range error for `index` in a list of `len` items
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a source error from anything printable
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
