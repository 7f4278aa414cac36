//! Query matching and usage ranking over an index snapshot.

use crate::profile::{DEFAULT_PROTOCOL, ProfileRecord};
use crate::usage::UsageStore;
use serde::Serialize;
use std::cmp::Reverse;
use std::path::PathBuf;
use tracing::debug;

/// Number of results shown when the config does not say otherwise
pub const DEFAULT_LIMIT: usize = 8;

/// A ranked result, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    pub id: String,
    pub title: String,
    pub protocol: String,
    /// Icon key, the protocol or `rdp` when the profile has none
    pub icon: String,
    pub path: PathBuf,
    pub description: String,
    /// Usage count at query time
    pub uses: u64,
}

impl ProfileEntry {
    fn from_record(record: &ProfileRecord, uses: u64) -> Self {
        let icon = if record.protocol.is_empty() {
            DEFAULT_PROTOCOL.to_string()
        } else {
            record.protocol.clone()
        };

        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            protocol: record.protocol.clone(),
            icon,
            path: record.path.clone(),
            description: record.description.clone(),
            uses,
        }
    }
}

/// A lower-cased query: the whole string plus its whitespace tokens.
#[derive(Debug, Clone)]
struct Query {
    raw: String,
    tokens: Vec<String>,
}

impl Query {
    fn new(raw: &str) -> Self {
        let raw = raw.to_lowercase();
        let tokens = raw.split_whitespace().map(str::to_string).collect();
        Self { raw, tokens }
    }

    /// The id and title are matched against the whole query string, while the
    /// description must contain every token. Short fragments therefore hit
    /// file names, and multi-word queries hit descriptions in any word order.
    fn matches(&self, record: &ProfileRecord) -> bool {
        if record.id.to_lowercase().contains(&self.raw)
            || record.title.to_lowercase().contains(&self.raw)
        {
            return true;
        }

        let description = record.description.to_lowercase();
        self.tokens.iter().all(|token| description.contains(token.as_str()))
    }
}

/// Filter `records` by `raw_query` and rank the matches by usage.
///
/// Matches keep their input order among equal counts, so with a scanned index
/// ties fall back to path order. At most `limit` entries are returned.
#[must_use]
pub fn query<'a, I>(
    records: I,
    raw_query: &str,
    usage: &UsageStore,
    limit: usize,
) -> Vec<ProfileEntry>
where
    I: IntoIterator<Item = &'a ProfileRecord>,
{
    if limit == 0 {
        return Vec::new();
    }

    let query = Query::new(raw_query);
    let mut matches: Vec<(&ProfileRecord, u64)> = records
        .into_iter()
        .filter(|record| query.matches(record))
        .map(|record| (record, usage.count(&record.id)))
        .collect();

    // sort_by_key is stable
    matches.sort_by_key(|(_, uses)| Reverse(*uses));

    let total = matches.len();
    let entries: Vec<ProfileEntry> = matches
        .into_iter()
        .take(limit)
        .map(|(record, uses)| ProfileEntry::from_record(record, uses))
        .collect();

    debug!(
        "Query {:?}: {} matched, returning {}",
        raw_query,
        total,
        entries.len()
    );
    entries
}
