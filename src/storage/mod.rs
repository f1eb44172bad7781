//! Local persistence layer
//!
//! - Key-value store backends (memory, file system)
//! - Per-wallet records: bookmarks, data hash, custom order

mod file_system;
mod persistence;

pub use file_system::{FileStore, KeyValueStore, MemoryStore};
pub use persistence::{PersistedState, WalletPersistence};
