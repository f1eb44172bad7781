//! Viewer configuration from environment variables
//!
//! Controls where per-wallet state is stored, how deep the undo buffer
//! goes, and the initial sort key.

use std::env;
use std::path::PathBuf;

use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::nft::OrderKey;

const DEFAULT_STORAGE_DIR: &str = "./nft-viewer-data";

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Base directory of the file-backed key-value store
    pub storage_dir: PathBuf,
    /// Undo buffer capacity per wallet
    pub history_depth: usize,
    /// Sort key used until the user picks another one
    pub order_by: OrderKey,
}

impl ViewerConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NFT_VIEWER_STORAGE_DIR`: store directory (default "./nft-viewer-data")
    /// - `NFT_VIEWER_HISTORY_DEPTH`: undo depth, positive integer (default 3)
    /// - `NFT_VIEWER_ORDER_BY`: "transaction" (default) or "creation"
    pub fn from_env() -> Self {
        let storage_dir = env::var("NFT_VIEWER_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR));
        log::info!("Storage directory: {}", storage_dir.display());

        let history_depth = match env::var("NFT_VIEWER_HISTORY_DEPTH") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    log::warn!(
                        "Invalid NFT_VIEWER_HISTORY_DEPTH '{}', defaulting to {}",
                        raw,
                        DEFAULT_HISTORY_DEPTH
                    );
                    DEFAULT_HISTORY_DEPTH
                }
            },
            Err(_) => DEFAULT_HISTORY_DEPTH,
        };

        let order_by = match env::var("NFT_VIEWER_ORDER_BY") {
            Ok(raw) => raw.parse::<OrderKey>().unwrap_or_else(|e| {
                log::warn!("{}, defaulting to {}", e, OrderKey::default());
                OrderKey::default()
            }),
            Err(_) => OrderKey::default(),
        };

        Self {
            storage_dir,
            history_depth,
            order_by,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            history_depth: DEFAULT_HISTORY_DEPTH,
            order_by: OrderKey::default(),
        }
    }
}
