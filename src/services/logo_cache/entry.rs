//! Persisted logo cache entry and the on-disk document that holds them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::models::LogoSource;

/// One resolved logo, keyed by normalized company name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoCacheEntry {
    /// Empty when an earlier resolution stored a failure
    #[serde(default, deserialize_with = "nullable_string")]
    pub url: String,
    #[serde(default)]
    pub source: LogoSource,
    #[serde(default, deserialize_with = "nullable_string")]
    pub initials: String,
    /// Milliseconds since the Unix epoch, 0 for entries written without one
    #[serde(default)]
    pub timestamp: i64,
}

impl LogoCacheEntry {
    pub fn new<U: Into<String>, I: Into<String>>(url: U, source: LogoSource, initials: I) -> Self {
        Self {
            url: url.into(),
            source,
            initials: initials.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Whether the entry carries a usable URL
    pub fn has_url(&self) -> bool {
        let url = self.url.trim();
        !url.is_empty() && url != "null"
    }
}

/// File layout: `{ "cache": { key: entry }, "lastUpdated": RFC3339 | null }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoCacheDocument {
    #[serde(default)]
    pub cache: BTreeMap<String, LogoCacheEntry>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
