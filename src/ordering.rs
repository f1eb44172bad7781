//! Pure list ordering functions
//!
//! Nothing in here touches storage or mutates its input. The reducers in
//! [`crate::list_state`] and [`crate::bookmarks`] are built on these.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::bookmarks::{BookmarkEntry, BookmarkMapping};
use crate::error::ViewerError;
use crate::nft::{NftList, NftRecord, OrderKey};

/// Order-independent digest of a list's mint set
///
/// Only used to detect whether a wallet's holdings changed between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-256 (lowercase hex) over the compact JSON array of sorted mints
pub fn fingerprint(list: &[NftRecord]) -> Fingerprint {
    let mut mints: Vec<&str> = list.iter().map(|item| item.mint.as_str()).collect();
    mints.sort_unstable();

    let serialized = Value::from(mints).to_string();
    let digest = Sha256::digest(serialized.as_bytes());
    Fingerprint(hex::encode(digest))
}

/// Sort by bookmark recency first, then descending by `key`
///
/// - bookmarked records come before unbookmarked ones
/// - bookmarked records are ascending by bookmark time (earliest first)
/// - the rest are descending by the chosen timestamp
///
/// The sort is stable and returns a new list.
pub fn sort_by_key_desc(list: &[NftRecord], key: OrderKey) -> NftList {
    let mut sorted = list.to_vec();
    sorted.sort_by(|a, b| compare_for_display(a, b, key));
    sorted
}

fn compare_for_display(a: &NftRecord, b: &NftRecord, key: OrderKey) -> Ordering {
    match (a.bookmarked_time, b.bookmarked_time) {
        (Some(a_time), Some(b_time)) => a_time.cmp(&b_time),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => key.timestamp(b).cmp(&key.timestamp(a)),
    }
}

/// Move the record at `from` so it lands at `to`, where `to` counts over the
/// list with the moved record already removed
///
/// Callers enforce the bookmark drag policy; this only checks bounds.
pub fn compute_reordered_list(
    list: &[NftRecord],
    from: usize,
    to: usize,
) -> Result<NftList, ViewerError> {
    let len = list.len();
    if from >= len {
        return Err(ViewerError::out_of_range(from, len));
    }
    if to >= len {
        return Err(ViewerError::out_of_range(to, len));
    }

    let mut reordered = list.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Ok(reordered)
}

/// Project every record carrying a bookmark time into a bookmark mapping
pub fn bookmark_mapping_from_list(list: &[NftRecord]) -> BookmarkMapping {
    list.iter()
        .filter_map(|item| {
            item.bookmarked_time
                .map(|time| (item.mint.clone(), BookmarkEntry::at(time)))
        })
        .collect()
}

/// Overwrite every record's bookmark fields from `mapping`
///
/// Mints present in the mapping become bookmarked with the mapped time,
/// whatever their stored flag says; everything else is cleared.
pub fn apply_bookmark_mapping(list: &[NftRecord], mapping: &BookmarkMapping) -> NftList {
    list.iter()
        .map(|item| {
            let mut item = item.clone();
            match mapping.get(&item.mint) {
                Some(entry) => {
                    item.bookmark = true;
                    item.bookmarked_time = Some(entry.bookmarked_time);
                }
                None => {
                    item.bookmark = false;
                    item.bookmarked_time = None;
                }
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn record(mint: &str, tx: i64, created: i64) -> NftRecord {
        NftRecord::new(mint, format!("https://meta/{}", mint), ts(tx), ts(created))
    }

    fn bookmarked(mint: &str, tx: i64, at: i64) -> NftRecord {
        let mut item = record(mint, tx, 0);
        item.bookmark = true;
        item.bookmarked_time = Some(ts(at));
        item
    }

    fn mints(list: &[NftRecord]) -> Vec<&str> {
        list.iter().map(|item| item.mint.as_str()).collect()
    }

    #[test]
    fn test_fingerprint_known_vector() {
        // sha256 of the string ["A","B"]
        let list = vec![record("B", 0, 0), record("A", 0, 0)];
        let expected = hex::encode(Sha256::digest(br#"["A","B"]"#));
        assert_eq!(fingerprint(&list).as_str(), expected);
    }

    #[test]
    fn test_fingerprint_ignores_order_and_bookmarks() {
        let a = vec![record("A", 1, 1), record("B", 2, 2), record("C", 3, 3)];
        let b = vec![bookmarked("C", 9, 4), record("A", 7, 7), record("B", 0, 0)];
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_detects_holdings_change() {
        let before = vec![record("A", 1, 1), record("B", 2, 2)];
        let after = vec![record("A", 1, 1), record("B", 2, 2), record("C", 3, 3)];
        assert_ne!(fingerprint(&before), fingerprint(&after));
    }

    #[test]
    fn test_sort_newest_transaction_first() {
        let list = vec![record("A", 10, 0), record("B", 20, 0)];
        let sorted = sort_by_key_desc(&list, OrderKey::LastTransactionTime);
        assert_eq!(mints(&sorted), vec!["B", "A"]);
        // input untouched
        assert_eq!(mints(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_sort_by_creation_time() {
        let list = vec![record("A", 30, 1), record("B", 20, 3), record("C", 10, 2)];
        let sorted = sort_by_key_desc(&list, OrderKey::LastCreationTime);
        assert_eq!(mints(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_pins_bookmarks_in_bookmark_order() {
        let list = vec![
            record("A", 50, 0),
            bookmarked("B", 1, 200),
            record("C", 40, 0),
            bookmarked("D", 2, 100),
        ];
        let sorted = sort_by_key_desc(&list, OrderKey::LastTransactionTime);
        assert_eq!(mints(&sorted), vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let list = vec![
            record("A", 5, 0),
            record("B", 5, 0),
            bookmarked("C", 1, 7),
            record("D", 9, 0),
        ];
        let once = sort_by_key_desc(&list, OrderKey::LastTransactionTime);
        let twice = sort_by_key_desc(&once, OrderKey::LastTransactionTime);
        assert_eq!(once, twice);
        assert_eq!(mints(&once), vec!["C", "D", "A", "B"]);
    }

    #[test]
    fn test_reorder_forward_and_backward() {
        let list = vec![record("A", 0, 0), record("B", 0, 0), record("C", 0, 0), record("D", 0, 0)];

        let forward = compute_reordered_list(&list, 0, 2).unwrap();
        assert_eq!(mints(&forward), vec!["B", "C", "A", "D"]);

        let backward = compute_reordered_list(&list, 3, 1).unwrap();
        assert_eq!(mints(&backward), vec!["A", "D", "B", "C"]);

        let same = compute_reordered_list(&list, 1, 1).unwrap();
        assert_eq!(same, list);
    }

    #[test]
    fn test_reorder_preserves_mint_multiset() {
        let list: Vec<NftRecord> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|m| record(m, 0, 0))
            .collect();
        let mut expected = mints(&list);
        expected.sort();

        for from in 0..list.len() {
            for to in 0..list.len() {
                let reordered = compute_reordered_list(&list, from, to).unwrap();
                let mut got = mints(&reordered);
                got.sort();
                assert_eq!(got, expected, "from={} to={}", from, to);
            }
        }
    }

    #[test]
    fn test_reorder_rejects_out_of_range() {
        let list = vec![record("A", 0, 0), record("B", 0, 0)];
        assert!(matches!(
            compute_reordered_list(&list, 2, 0),
            Err(ViewerError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(compute_reordered_list(&list, 0, 2).is_err());
        assert!(compute_reordered_list(&[], 0, 0).is_err());
    }

    #[test]
    fn test_bookmark_mapping_skips_unbookmarked() {
        let list = vec![record("A", 0, 0), bookmarked("B", 0, 42)];
        let mapping = bookmark_mapping_from_list(&list);

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["B"], BookmarkEntry::at(ts(42)));
        assert!(!mapping.contains_key("A"));
    }

    #[test]
    fn test_apply_bookmark_mapping_overwrites_both_ways() {
        let list = vec![bookmarked("A", 0, 1), record("B", 0, 0)];
        let mut mapping = BookmarkMapping::new();
        mapping.insert("B".to_string(), BookmarkEntry::at(ts(5)));

        let applied = apply_bookmark_mapping(&list, &mapping);
        assert!(!applied[0].bookmark);
        assert_eq!(applied[0].bookmarked_time, None);
        assert!(applied[1].bookmark);
        assert_eq!(applied[1].bookmarked_time, Some(ts(5)));
    }

    #[test]
    fn test_apply_bookmark_mapping_ignores_stale_flag() {
        let list = vec![record("A", 0, 0)];
        let mut mapping = BookmarkMapping::new();
        mapping.insert(
            "A".to_string(),
            BookmarkEntry {
                bookmark: false,
                bookmarked_time: ts(7),
            },
        );

        let applied = apply_bookmark_mapping(&list, &mapping);
        assert!(applied[0].bookmark);
        assert!(applied[0].is_bookmarked());
        assert_eq!(applied[0].bookmarked_time, Some(ts(7)));
    }
}
