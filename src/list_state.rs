//! List state reducer, persistence intents, and fresh-list reconciliation
//!
//! The reducer never writes to storage itself. Each dispatch returns the
//! [`PersistIntent`]s that settle it, and the caller executes them in order
//! (see [`crate::storage::WalletPersistence::apply`]).

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::bookmarks::BookmarkMapping;
use crate::error::ViewerError;
use crate::nft::{NftList, NftRecord, OrderKey};
use crate::ordering::{
    apply_bookmark_mapping, bookmark_mapping_from_list, fingerprint, sort_by_key_desc, Fingerprint,
};
use crate::storage::PersistedState;

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    /// Unconditional replace, used for fresh data and undo
    SetList(NftList),
    SortByKey(OrderKey),
    /// In-place update of the record at `index` in the current order
    UpdateBookmark {
        index: usize,
        bookmark: bool,
        bookmarked_time: Option<DateTime<Utc>>,
    },
    ClearAllBookmark,
    /// Leaves the list untouched and emits the custom-order write
    SaveCustomOrder,
}

/// Side effect a reducer asks its caller to perform
#[derive(Debug, Clone, PartialEq)]
pub enum PersistIntent {
    SaveBookmarks(BookmarkMapping),
    SaveCustomOrder {
        fingerprint: Fingerprint,
        list: NftList,
    },
}

/// Apply `action` to `list`
///
/// Mutating actions are settled in the same call: the returned intents end
/// with a `SaveCustomOrder` of the new state. On error the list is unchanged.
pub fn reduce_list(list: &mut NftList, action: ListAction) -> Result<Vec<PersistIntent>, ViewerError> {
    match action {
        ListAction::SetList(replacement) => {
            log::debug!("list set ({} items)", replacement.len());
            *list = replacement;
        }
        ListAction::SortByKey(key) => {
            log::debug!("list sort by {}", key);
            *list = sort_by_key_desc(list, key);
        }
        ListAction::UpdateBookmark {
            index,
            bookmark,
            bookmarked_time,
        } => {
            let len = list.len();
            let item = list
                .get_mut(index)
                .ok_or_else(|| ViewerError::out_of_range(index, len))?;
            log::debug!("list bookmark {} -> {}", item.mint, bookmark);
            item.bookmark = bookmark;
            item.bookmarked_time = bookmarked_time;
        }
        ListAction::ClearAllBookmark => {
            log::debug!("list clear all bookmarks");
            for item in list.iter_mut() {
                item.bookmark = false;
                item.bookmarked_time = None;
            }
        }
        ListAction::SaveCustomOrder => {}
    }

    Ok(vec![settle(list)])
}

fn settle(list: &[NftRecord]) -> PersistIntent {
    PersistIntent::SaveCustomOrder {
        fingerprint: fingerprint(list),
        list: list.to_vec(),
    }
}

/// Which representation the reconciliation adopted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// Holdings unchanged, the user's saved arrangement was kept
    CustomOrder,
    /// Holdings changed (or nothing usable was saved), fetched records adopted
    Fresh,
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub list: NftList,
    pub bookmarks: BookmarkMapping,
    pub fingerprint: Fingerprint,
    pub source: ListSource,
}

/// Decide the working list for a freshly fetched, unordered `fresh` list
///
/// When the fingerprint matches the stored one and the stored custom order
/// holds exactly the fetched mints, the saved arrangement is kept. Record data
/// always comes from the fetch and bookmark fields always come from the stored
/// bookmark mapping. Otherwise the fetched order is adopted. Either way the
/// returned mapping is derived from the returned list, so the two agree.
pub fn reconcile(fresh: NftList, persisted: &PersistedState) -> Reconciled {
    let fresh = dedup_by_mint(fresh);
    let current = fingerprint(&fresh);

    let arranged = match &persisted.data_hash {
        Some(saved) if *saved == current => arrange_like(&fresh, &persisted.custom_order),
        Some(_) => {
            log::info!("holdings changed since last session, discarding custom order");
            None
        }
        None => None,
    };

    let (ordered, source) = match arranged {
        Some(ordered) => {
            flag_bookmark_disagreement(&persisted.custom_order, &persisted.bookmarks);
            (ordered, ListSource::CustomOrder)
        }
        None => (fresh, ListSource::Fresh),
    };

    let list = apply_bookmark_mapping(&ordered, &persisted.bookmarks);
    let bookmarks = bookmark_mapping_from_list(&list);
    log::info!(
        "reconciled {} items from {:?} ({} bookmarked)",
        list.len(),
        source,
        bookmarks.len()
    );

    Reconciled {
        list,
        bookmarks,
        fingerprint: current,
        source,
    }
}

fn dedup_by_mint(list: NftList) -> NftList {
    let before = list.len();
    let mut seen = HashSet::new();
    let deduped: NftList = list
        .into_iter()
        .filter(|item| seen.insert(item.mint.clone()))
        .collect();
    if deduped.len() != before {
        log::warn!("dropped {} duplicate mints from fetched list", before - deduped.len());
    }
    deduped
}

/// Fetched records in the saved order, or `None` if the saved order does not
/// cover exactly the fetched mint set
fn arrange_like(fresh: &[NftRecord], saved: &[NftRecord]) -> Option<NftList> {
    if saved.len() != fresh.len() {
        log::warn!(
            "custom order has {} items but {} were fetched, ignoring it",
            saved.len(),
            fresh.len()
        );
        return None;
    }

    let mut by_mint: HashMap<&str, &NftRecord> =
        fresh.iter().map(|item| (item.mint.as_str(), item)).collect();

    let mut arranged = Vec::with_capacity(fresh.len());
    for item in saved {
        match by_mint.remove(item.mint.as_str()) {
            Some(record) => arranged.push(record.clone()),
            None => {
                log::warn!("custom order references {} which was not fetched, ignoring it", item.mint);
                return None;
            }
        }
    }
    Some(arranged)
}

fn flag_bookmark_disagreement(saved: &[NftRecord], mapping: &BookmarkMapping) {
    let disagreeing = saved
        .iter()
        .filter(|item| mapping.get(&item.mint).map(|entry| entry.bookmarked_time) != item.bookmarked_time)
        .count();
    if disagreeing > 0 {
        log::warn!(
            "{} items in the custom order disagree with the bookmark mapping, using the mapping",
            disagreeing
        );
    }
}
