//! Bookmark state reducer
//!
//! Keeps the mint -> bookmark mapping independent of list order. Absence from
//! the mapping means "not bookmarked"; there is no stored false state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::list_state::PersistIntent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkEntry {
    pub bookmark: bool,
    pub bookmarked_time: DateTime<Utc>,
}

impl BookmarkEntry {
    /// A bookmark set at `time`
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            bookmark: true,
            bookmarked_time: time,
        }
    }
}

pub type BookmarkMapping = BTreeMap<String, BookmarkEntry>;

#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkAction {
    /// Insert or overwrite a bookmark; `at` is supplied by the caller's clock
    Add { mint: String, at: DateTime<Utc> },
    /// Remove the entry entirely
    Delete { mint: String },
    /// Reset to an empty mapping
    Clear,
    /// Wholesale substitution, no merge
    Replace(BookmarkMapping),
}

/// Apply `action` to `mapping` and return the write-through intent
///
/// Every transition yields exactly one `SaveBookmarks`, so a caller that
/// executes the intents writes once per settle.
pub fn reduce_bookmarks(mapping: &mut BookmarkMapping, action: BookmarkAction) -> Vec<PersistIntent> {
    match action {
        BookmarkAction::Add { mint, at } => {
            log::debug!("bookmark add {}", mint);
            mapping.insert(mint, BookmarkEntry::at(at));
        }
        BookmarkAction::Delete { mint } => {
            log::debug!("bookmark delete {}", mint);
            mapping.remove(&mint);
        }
        BookmarkAction::Clear => {
            log::debug!("bookmark clear ({} entries)", mapping.len());
            mapping.clear();
        }
        BookmarkAction::Replace(replacement) => {
            log::debug!("bookmark replace ({} entries)", replacement.len());
            *mapping = replacement;
        }
    }

    vec![PersistIntent::SaveBookmarks(mapping.clone())]
}
