//! Per-wallet list session
//!
//! Orchestrates the list reducer, the bookmark reducer and the undo buffer
//! for one wallet identity. Every public mutation collects the persistence
//! intents of the dispatches it makes and settles them in one write pass
//! before returning, so storage is never more than one call behind memory.

use chrono::Utc;

use crate::bookmarks::{reduce_bookmarks, BookmarkAction, BookmarkMapping};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::history::NftListHistory;
use crate::list_state::{reconcile, reduce_list, ListAction, ListSource, PersistIntent};
use crate::nft::{NftList, NftRecord, OrderKey};
use crate::ordering::{bookmark_mapping_from_list, compute_reordered_list};
use crate::source::NftSource;
use crate::storage::{KeyValueStore, WalletPersistence};
use crate::Result;

pub struct NftListSession<S: KeyValueStore> {
    store: S,
    wallet: String,
    list: Option<NftList>,
    bookmarks: BookmarkMapping,
    history: NftListHistory,
    order_by: OrderKey,
}

impl<S: KeyValueStore> NftListSession<S> {
    /// Open a session for `wallet`; nothing is listed until fresh data arrives
    pub fn open(store: S, wallet: &str, config: &ViewerConfig) -> Self {
        let bookmarks = WalletPersistence::new(&store, wallet).load_bookmarks();
        log::info!("Opened session for {} ({} bookmarks)", wallet, bookmarks.len());

        Self {
            store,
            wallet: wallet.to_string(),
            list: None,
            bookmarks,
            history: NftListHistory::with_capacity(wallet, config.history_depth),
            order_by: config.order_by,
        }
    }

    /// Point the session at another wallet, dropping the list and undo history
    pub fn switch_wallet(&mut self, wallet: &str) {
        if self.wallet == wallet {
            return;
        }
        log::info!("Switching wallet {} -> {}", self.wallet, wallet);
        self.wallet = wallet.to_string();
        self.history.reset(wallet);
        self.list = None;
        self.bookmarks = self.persistence().load_bookmarks();
    }

    /// Fetch the wallet's holdings from `source` and adopt them
    ///
    /// A failed fetch leaves the session untouched.
    pub async fn refresh<N: NftSource>(&mut self, source: &N) -> Result<ListSource> {
        let fetched = source.fetch_nfts(&self.wallet).await?;
        self.load_fresh(fetched)
    }

    /// Reconcile a freshly fetched list with the persisted custom order
    ///
    /// A kept custom order is shown as saved; anything else is sorted by the
    /// session's order key so bookmarks come first.
    pub fn load_fresh(&mut self, fresh: NftList) -> Result<ListSource> {
        let persisted = self.persistence().load_state();
        let reconciled = reconcile(fresh, &persisted);

        let mut list = Vec::new();
        let mut intents = reduce_list(&mut list, ListAction::SetList(reconciled.list))?;
        if reconciled.source == ListSource::Fresh {
            intents.extend(reduce_list(&mut list, ListAction::SortByKey(self.order_by))?);
        }
        intents.extend(reduce_bookmarks(
            &mut self.bookmarks,
            BookmarkAction::Replace(reconciled.bookmarks),
        ));
        self.list = Some(list);

        self.settle(intents)?;
        Ok(reconciled.source)
    }

    /// Re-sort by `key` and remember it for later re-sorts
    pub fn sort_by(&mut self, key: OrderKey) -> Result<()> {
        let snapshot = self.loaded()?.to_vec();
        self.history.push(&snapshot);

        let intents = self.dispatch(ListAction::SortByKey(key))?;
        self.order_by = key;
        self.settle(intents)
    }

    /// Flip the bookmark on the record at `index` and re-sort
    ///
    /// Returns the record's new bookmark state.
    pub fn toggle_bookmark(&mut self, index: usize) -> Result<bool> {
        let list = self.loaded()?;
        let item = list
            .get(index)
            .ok_or_else(|| ViewerError::out_of_range(index, list.len()))?;
        let was_bookmarked = item.is_bookmarked();
        let mint = item.mint.clone();

        let snapshot = list.to_vec();
        self.history.push(&snapshot);

        let now = Utc::now();
        let key = self.order_by;
        let mut intents = self.dispatch(ListAction::UpdateBookmark {
            index,
            bookmark: !was_bookmarked,
            bookmarked_time: if was_bookmarked { None } else { Some(now) },
        })?;
        intents.extend(self.dispatch(ListAction::SortByKey(key))?);

        let action = if was_bookmarked {
            BookmarkAction::Delete { mint }
        } else {
            BookmarkAction::Add { mint, at: now }
        };
        intents.extend(reduce_bookmarks(&mut self.bookmarks, action));

        self.settle(intents)?;
        Ok(!was_bookmarked)
    }

    pub fn clear_bookmarks(&mut self) -> Result<()> {
        let snapshot = self.loaded()?.to_vec();
        self.history.push(&snapshot);

        let key = self.order_by;
        let mut intents = self.dispatch(ListAction::ClearAllBookmark)?;
        intents.extend(self.dispatch(ListAction::SortByKey(key))?);
        intents.extend(reduce_bookmarks(&mut self.bookmarks, BookmarkAction::Clear));
        self.settle(intents)
    }

    /// Drag the record at `from` onto position `to`
    ///
    /// Bookmarked records are pinned: they can be neither moved nor dropped on.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let list = self.loaded()?;
        let reordered = compute_reordered_list(list, from, to)?;
        for index in [from, to] {
            if list[index].is_bookmarked() {
                return Err(ViewerError::BookmarkedItemLocked(list[index].mint.clone()));
            }
        }

        let snapshot = list.to_vec();
        self.history.push(&snapshot);

        let intents = self.dispatch(ListAction::SetList(reordered))?;
        self.settle(intents)
    }

    /// Restore the previous snapshot; returns `false` when there is nothing to undo
    pub fn undo(&mut self) -> Result<bool> {
        if self.list.is_none() || self.history.is_empty() {
            return Ok(false);
        }

        let previous = self.history.pop();
        let restored = bookmark_mapping_from_list(&previous);

        let mut intents = self.dispatch(ListAction::SetList(previous))?;
        intents.extend(reduce_bookmarks(
            &mut self.bookmarks,
            BookmarkAction::Replace(restored),
        ));
        self.settle(intents)?;
        Ok(true)
    }

    /// Current list in display order; empty until data has loaded
    pub fn list(&self) -> &[NftRecord] {
        self.list.as_deref().unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.list.is_some()
    }

    pub fn bookmarks(&self) -> &BookmarkMapping {
        &self.bookmarks
    }

    pub fn has_bookmarks(&self) -> bool {
        !self.bookmarks.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.is_loaded() && !self.history.is_empty()
    }

    pub fn order_by(&self) -> OrderKey {
        self.order_by
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persistence(&self) -> WalletPersistence<'_, S> {
        WalletPersistence::new(&self.store, &self.wallet)
    }

    fn loaded(&self) -> Result<&NftList> {
        self.list.as_ref().ok_or(ViewerError::NothingLoaded)
    }

    fn dispatch(&mut self, action: ListAction) -> Result<Vec<PersistIntent>> {
        let list = self.list.as_mut().ok_or(ViewerError::NothingLoaded)?;
        reduce_list(list, action)
    }

    /// Write the last intent of each kind; earlier ones are superseded
    fn settle(&self, intents: Vec<PersistIntent>) -> Result<()> {
        let mut bookmarks = None;
        let mut custom_order = None;
        for intent in intents {
            match intent {
                PersistIntent::SaveBookmarks(_) => bookmarks = Some(intent),
                PersistIntent::SaveCustomOrder { .. } => custom_order = Some(intent),
            }
        }

        let persistence = self.persistence();
        for intent in [custom_order, bookmarks].into_iter().flatten() {
            persistence.apply(&intent)?;
        }
        Ok(())
    }
}
