//! Bounded undo buffer of list snapshots, scoped to one wallet identity

use std::collections::VecDeque;

use crate::nft::{NftList, NftRecord};

pub const DEFAULT_HISTORY_DEPTH: usize = 3;

#[derive(Debug, Clone)]
pub struct NftListHistory {
    wallet: String,
    capacity: usize,
    snapshots: VecDeque<NftList>,
}

impl NftListHistory {
    pub fn new(wallet: impl Into<String>) -> Self {
        Self::with_capacity(wallet, DEFAULT_HISTORY_DEPTH)
    }

    /// A zero capacity is bumped to one so undo always has a slot
    pub fn with_capacity(wallet: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            wallet: wallet.into(),
            capacity,
            snapshots: VecDeque::with_capacity(capacity),
        }
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot `list`, evicting the oldest entry when full
    pub fn push(&mut self, list: &[NftRecord]) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(list.to_vec());
    }

    /// Most recent snapshot, or an empty list when there is nothing to undo
    pub fn pop(&mut self) -> NftList {
        self.snapshots.pop_back().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop all snapshots if `wallet` differs from the current identity
    pub fn reset(&mut self, wallet: &str) {
        if self.wallet != wallet {
            log::debug!(
                "history reset: wallet changed {} -> {}",
                self.wallet,
                wallet
            );
            self.wallet = wallet.to_string();
            self.snapshots.clear();
        }
    }
}
