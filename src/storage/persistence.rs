//! Per-wallet persisted records
//!
//! Each wallet identity `W` owns three keys: `W_BOOKMARK` (JSON mapping),
//! `W_DATA_HASH` (fingerprint string) and `W_CUSTOM_ORDER` (JSON list).
//! Reads never fail: missing or corrupt records load as empty.

use serde::de::DeserializeOwned;

use super::file_system::KeyValueStore;
use crate::bookmarks::BookmarkMapping;
use crate::error::StorageError;
use crate::list_state::PersistIntent;
use crate::nft::{NftList, NftRecord};
use crate::ordering::Fingerprint;

const BOOKMARK_KEY: &str = "BOOKMARK";
const DATA_HASH_KEY: &str = "DATA_HASH";
const CUSTOM_ORDER_KEY: &str = "CUSTOM_ORDER";

/// Everything stored for one wallet, as read on initial load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub bookmarks: BookmarkMapping,
    pub data_hash: Option<Fingerprint>,
    pub custom_order: NftList,
}

pub struct WalletPersistence<'a, S: KeyValueStore> {
    store: &'a S,
    wallet: &'a str,
}

impl<'a, S: KeyValueStore> WalletPersistence<'a, S> {
    pub fn new(store: &'a S, wallet: &'a str) -> Self {
        Self { store, wallet }
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.wallet, suffix)
    }

    fn read(&self, suffix: &str) -> Option<String> {
        let key = self.key(suffix);
        match self.store.get(&key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned + Default>(&self, suffix: &str) -> T {
        let Some(raw) = self.read(suffix) else {
            return T::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Corrupt {}, starting empty: {}", self.key(suffix), e);
            T::default()
        })
    }

    pub fn load_bookmarks(&self) -> BookmarkMapping {
        self.read_json(BOOKMARK_KEY)
    }

    pub fn save_bookmarks(&self, bookmarks: &BookmarkMapping) -> Result<(), StorageError> {
        let json = serde_json::to_string(bookmarks)?;
        self.store.set(&self.key(BOOKMARK_KEY), &json)
    }

    pub fn load_data_hash(&self) -> Option<Fingerprint> {
        self.read(DATA_HASH_KEY)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(Fingerprint::from)
    }

    pub fn save_data_hash(&self, hash: &Fingerprint) -> Result<(), StorageError> {
        self.store.set(&self.key(DATA_HASH_KEY), hash.as_str())
    }

    pub fn load_custom_order(&self) -> NftList {
        self.read_json(CUSTOM_ORDER_KEY)
    }

    pub fn save_custom_order(&self, list: &[NftRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(list)?;
        self.store.set(&self.key(CUSTOM_ORDER_KEY), &json)
    }

    pub fn load_state(&self) -> PersistedState {
        PersistedState {
            bookmarks: self.load_bookmarks(),
            data_hash: self.load_data_hash(),
            custom_order: self.load_custom_order(),
        }
    }

    /// Execute one reducer intent against the store
    pub fn apply(&self, intent: &PersistIntent) -> Result<(), StorageError> {
        match intent {
            PersistIntent::SaveBookmarks(bookmarks) => self.save_bookmarks(bookmarks),
            PersistIntent::SaveCustomOrder { fingerprint, list } => {
                self.save_data_hash(fingerprint)?;
                self.save_custom_order(list)
            }
        }
    }
}
