use super::ProfileRecord;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name suffix of Remmina profiles
pub const DEFAULT_SUFFIX: &str = ".remmina";

/// Keep listed paths whose file name ends in `suffix`. An entry that failed
/// to list is logged and skipped.
fn matching_paths<I>(entries: I, dir: &Path, suffix: &str) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
        })
        .collect()
}

/// Snapshot of one directory scan, ordered by full path.
#[derive(Debug, Clone, Default)]
pub struct ProfileIndex {
    records: Vec<ProfileRecord>,
}

impl ProfileIndex {
    /// Scan `dir` for files ending in `suffix`.
    ///
    /// A directory that cannot be read is logged and yields an empty index.
    #[must_use]
    pub fn scan(dir: &Path, suffix: &str) -> Self {
        match Self::try_scan(dir, suffix) {
            Ok(index) => index,
            Err(e) => {
                warn!("Failed to list profiles in {}: {}", dir.display(), e);
                Self::default()
            }
        }
    }

    /// Scan `dir` for files ending in `suffix`, reporting directory errors.
    ///
    /// Files that match the suffix but cannot be read still produce a record
    /// with fallback fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn try_scan(dir: &Path, suffix: &str) -> Result<Self> {
        let entries = std::fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
        let mut paths = matching_paths(entries, dir, suffix);

        // PathBuf orders component-wise; compare the raw bytes so the order is
        // plain lexicographic over the full path.
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let records: Vec<ProfileRecord> = paths.into_iter().map(ProfileRecord::load).collect();
        debug!(
            "Indexed {} profiles from {}",
            records.len(),
            dir.display()
        );

        Ok(Self::from_records(records))
    }

    /// Build an index from already-parsed records, keeping their order.
    #[must_use]
    pub fn from_records(records: Vec<ProfileRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfileRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get_by_path(&self, path: &Path) -> Option<&ProfileRecord> {
        self.records.iter().find(|r| r.path == path)
    }

    /// First record with this id, in path order.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&ProfileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Resolve a selection: an indexed file path, or otherwise an id.
    #[must_use]
    pub fn resolve(&self, selector: &str) -> Option<&ProfileRecord> {
        self.get_by_path(Path::new(selector))
            .or_else(|| self.get_by_id(selector))
    }
}

impl<'a> IntoIterator for &'a ProfileIndex {
    type Item = &'a ProfileRecord;
    type IntoIter = std::slice::Iter<'a, ProfileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_entry_does_not_hide_the_rest() {
        let dir = Path::new("/profiles");
        let entries = vec![
            Ok(dir.join("office-pc.remmina")),
            Err(std::io::Error::other("stale handle")),
            Ok(dir.join("notes.txt")),
            Ok(dir.join("build-box.remmina")),
        ];

        let paths = matching_paths(entries, dir, DEFAULT_SUFFIX);

        assert_eq!(
            paths,
            vec![dir.join("office-pc.remmina"), dir.join("build-box.remmina")]
        );
    }

    #[test]
    fn test_suffix_is_matched_on_file_name_only() {
        let dir = Path::new("/srv/x.remmina");
        let entries = vec![Ok(dir.join("plain")), Ok(dir.join("a.remmina"))];

        assert_eq!(
            matching_paths(entries, dir, DEFAULT_SUFFIX),
            vec![dir.join("a.remmina")]
        );
    }
}
