//! NFT Viewer: wallet NFT list ordering with local persistence
//!
//! Given a freshly fetched, unordered list of the NFTs a wallet holds, this
//! crate decides whether to show the fetched order or the user's saved custom
//! order, keeps bookmarks and ordering consistent across user actions, offers
//! a short undo buffer, and persists everything per wallet.
//!
//! # Architecture
//!
//! - **Ordering**: pure functions for fingerprints, sorting and drag reordering
//! - **Reducers**: list and bookmark state transitions that return persistence intents
//! - **Storage**: per-wallet records on top of a small key-value store
//! - **Session**: orchestrates reducers, undo history and persistence for one wallet
//!
//! # Example
//!
//! ```ignore
//! use nft_viewer::{MemoryStore, NftListSession, OrderKey, ViewerConfig};
//!
//! let mut session = NftListSession::open(MemoryStore::new(), "WalletAddr", &ViewerConfig::default());
//! session.load_fresh(fetched)?;
//! session.toggle_bookmark(2)?;
//! session.sort_by(OrderKey::LastCreationTime)?;
//! session.undo()?;
//! ```

// Public modules
pub mod bookmarks;
pub mod config;
pub mod drag;
pub mod error;
pub mod history;
pub mod list_state;
pub mod nft;
pub mod ordering;
pub mod session;
pub mod source;
pub mod storage;

// Re-exports for convenience
pub use bookmarks::{reduce_bookmarks, BookmarkAction, BookmarkEntry, BookmarkMapping};
pub use config::ViewerConfig;
pub use drag::{DragState, ItemUiState};
pub use error::{StorageError, ViewerError};
pub use history::{NftListHistory, DEFAULT_HISTORY_DEPTH};
pub use list_state::{reconcile, reduce_list, ListAction, ListSource, PersistIntent, Reconciled};
pub use nft::{Creator, NftList, NftRecord, OrderKey};
pub use ordering::{
    apply_bookmark_mapping, bookmark_mapping_from_list, compute_reordered_list, fingerprint,
    sort_by_key_desc, Fingerprint,
};
pub use session::NftListSession;
pub use source::{JsonFileSource, NftSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistedState, WalletPersistence};

// Common result type
pub type Result<T> = std::result::Result<T, ViewerError>;
