//! NFT fetch service contract
//!
//! The real source talks to a chain RPC and a metadata service; the list
//! engine only needs an unordered list of records per wallet.

use std::future::Future;
use std::path::PathBuf;

use crate::error::ViewerError;
use crate::nft::NftList;

pub trait NftSource {
    /// Fetch every NFT held by `wallet`, in no particular order
    fn fetch_nfts(&self, wallet: &str) -> impl Future<Output = Result<NftList, ViewerError>> + Send;
}

/// Reads pre-fetched records from `<dir>/<wallet>.json`
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl NftSource for JsonFileSource {
    async fn fetch_nfts(&self, wallet: &str) -> Result<NftList, ViewerError> {
        let path = self.dir.join(format!("{}.json", wallet));
        log::debug!("Loading NFTs for {} from {}", wallet, path.display());

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ViewerError::source(format!("{}: {}", path.display(), e)))?;
        let list: NftList = serde_json::from_str(&contents)
            .map_err(|e| ViewerError::source(format!("{}: {}", path.display(), e)))?;

        log::info!("Fetched {} NFTs for {}", list.len(), wallet);
        Ok(list)
    }
}
