//! Remmina profile records: parsing a single `.remmina` file and indexing a
//! directory of them.

mod index;
mod parser;

pub use index::{DEFAULT_SUFFIX, ProfileIndex};
pub use parser::{DEFAULT_PROTOCOL, parse, parse_file};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fields extracted from the text of one profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    /// Value of the last non-empty `name=` line, empty if none
    pub title: String,
    pub server: String,
    pub username: String,
    pub group: String,
    /// Trimmed and lower-cased
    pub protocol: String,
    /// Composed display string, see [`parse`]
    pub description: String,
}

impl ProfileFields {
    /// Fields used when a profile file cannot be read at all.
    #[must_use]
    pub fn unreadable() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            ..Self::default()
        }
    }
}

/// One indexed profile.
///
/// The `id` is derived from `path` once, at construction, and both are kept
/// so the derivation never has to be repeated elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub path: PathBuf,
    pub title: String,
    pub server: String,
    pub username: String,
    pub group: String,
    pub protocol: String,
    pub description: String,
}

impl ProfileRecord {
    /// Build a record from a file path and its parsed fields.
    ///
    /// An empty title falls back to the id.
    #[must_use]
    pub fn new(path: PathBuf, fields: ProfileFields) -> Self {
        let id = profile_id(&path);
        let title = if fields.title.is_empty() {
            id.clone()
        } else {
            fields.title
        };

        Self {
            id,
            path,
            title,
            server: fields.server,
            username: fields.username,
            group: fields.group,
            protocol: fields.protocol,
            description: fields.description,
        }
    }

    /// Read and parse `path`, falling back to [`ProfileFields::unreadable`].
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let fields = match parse_file(&path) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("Failed to read profile {}: {}", path.display(), e);
                ProfileFields::unreadable()
            }
        };
        Self::new(path, fields)
    }
}

/// Profile identifier: the file's base name without its extension.
#[must_use]
pub fn profile_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
