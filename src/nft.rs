//! Data models for NFTs held by a wallet

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Ordered sequence of records for one wallet identity
pub type NftList = Vec<NftRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub address: String,
    pub verified: bool,
    pub share: u8,
}

/// One token owned by the wallet
///
/// `mint` is the primary key and is unique within a list. The bookmark
/// fields are user state layered on top of what the source returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftRecord {
    pub mint: String,
    #[serde(default)]
    pub creators: Option<Vec<Creator>>,
    pub uri: String,
    pub last_transaction_time: DateTime<Utc>,
    pub last_creation_time: DateTime<Utc>,
    #[serde(default)]
    pub bookmark: bool,
    #[serde(default)]
    pub bookmarked_time: Option<DateTime<Utc>>,
}

impl NftRecord {
    /// Create an unbookmarked record without creators
    pub fn new(
        mint: impl Into<String>,
        uri: impl Into<String>,
        last_transaction_time: DateTime<Utc>,
        last_creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            mint: mint.into(),
            creators: None,
            uri: uri.into(),
            last_transaction_time,
            last_creation_time,
            bookmark: false,
            bookmarked_time: None,
        }
    }

    /// A record counts as bookmarked for ordering purposes when it carries a bookmark time
    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked_time.is_some()
    }
}

/// Timestamp field a list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderKey {
    #[default]
    LastTransactionTime,
    LastCreationTime,
}

impl OrderKey {
    pub fn timestamp(&self, record: &NftRecord) -> DateTime<Utc> {
        match self {
            Self::LastTransactionTime => record.last_transaction_time,
            Self::LastCreationTime => record.last_creation_time,
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastTransactionTime => write!(f, "lastTransactionTime"),
            Self::LastCreationTime => write!(f, "lastCreationTime"),
        }
    }
}

impl FromStr for OrderKey {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transaction" | "lasttransactiontime" => Ok(Self::LastTransactionTime),
            "creation" | "lastcreationtime" => Ok(Self::LastCreationTime),
            other => Err(ViewerError::InvalidConfig(format!(
                "unknown order key '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_json_uses_camel_case() {
        let t = Utc.with_ymd_and_hms(2022, 3, 1, 12, 0, 0).unwrap();
        let record = NftRecord::new("Mint1", "https://arweave.net/1", t, t);
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("lastTransactionTime").is_some());
        assert!(json.get("lastCreationTime").is_some());
        assert_eq!(json["bookmark"], false);
        assert!(json["bookmarkedTime"].is_null());
    }

    #[test]
    fn test_record_accepts_missing_bookmark_fields() {
        let json = r#"{
            "mint": "Mint1",
            "uri": "https://arweave.net/1",
            "lastTransactionTime": "2022-03-01T12:00:00.000Z",
            "lastCreationTime": "2022-01-01T00:00:00Z"
        }"#;
        let record: NftRecord = serde_json::from_str(json).unwrap();

        assert!(!record.bookmark);
        assert!(!record.is_bookmarked());
        assert!(record.creators.is_none());
    }

    #[test]
    fn test_order_key_parsing() {
        assert_eq!(
            "transaction".parse::<OrderKey>().unwrap(),
            OrderKey::LastTransactionTime
        );
        assert_eq!(
            "lastCreationTime".parse::<OrderKey>().unwrap(),
            OrderKey::LastCreationTime
        );
        assert!("price".parse::<OrderKey>().is_err());
    }
}
