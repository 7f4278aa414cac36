//! Persistent per-profile usage counters.
//!
//! The snapshot is a single JSON object mapping profile id to the number of
//! times it was selected. It is rewritten in full after every increment.
//!
//! Several processes may share one snapshot. [`UsageStore::record`] holds an
//! exclusive lock on `<snapshot>.lock` while it re-reads, increments and
//! rewrites the file, so overlapping selections are never lost.

use crate::{Error, Result};
use fs4::fs_std::FileExt;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Usage counts keyed by profile id, bound to the file they persist to.
#[derive(Debug, Clone)]
pub struct UsageStore {
    path: PathBuf,
    counts: BTreeMap<String, u64>,
}

impl UsageStore {
    /// Create an empty store that will persist to `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            counts: BTreeMap::new(),
        }
    }

    /// Load the snapshot at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, and
    /// [`Error::UsageCorrupt`] if it is not a JSON object of non-negative
    /// integer counts. A corrupt snapshot is never replaced silently.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Usage snapshot not found at {}", path.display());
            return Ok(Self::new(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let counts: BTreeMap<String, u64> =
            serde_json::from_str(&content).map_err(|source| Error::UsageCorrupt {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            "Loaded usage for {} profiles from {}",
            counts.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            counts,
        })
    }

    /// Bump the counter for `id`, starting at 1. Returns the new count.
    pub fn increment(&mut self, id: &str) -> u64 {
        let count = self.counts.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Write the whole snapshot, replacing the previous one.
    ///
    /// The JSON is written to a sibling temp file and renamed into place so a
    /// crash mid-write leaves the previous snapshot intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the directory, temp file or rename fails.
    pub fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.counts)?;
        self.write_atomic(content.as_bytes())
            .map_err(|source| Error::Persist {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Saved usage for {} profiles to {}",
            self.counts.len(),
            self.path.display()
        );
        Ok(())
    }

    fn create_parent(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.create_parent()?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, bytes)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }

    /// Increment then persist, as one critical section across processes.
    ///
    /// Under the snapshot lock the file is re-read first, so counts written
    /// by other processes since [`UsageStore::load`] are kept. If persisting
    /// fails the in-memory count stays incremented, so ranking for the rest
    /// of the process still reflects the selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the lock cannot be taken or the snapshot
    /// cannot be written, and [`Error::UsageCorrupt`] if the snapshot on disk
    /// has been corrupted since it was loaded.
    pub fn record(&mut self, id: &str) -> Result<u64> {
        let lock = match self.lock() {
            Ok(lock) => lock,
            Err(source) => {
                self.increment(id);
                return Err(Error::Persist {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        self.merge_from_disk()?;
        let count = self.increment(id);
        self.persist()?;
        drop(lock);

        debug!("Recorded selection of {} (count={})", id, count);
        Ok(count)
    }

    /// Path of the advisory lock file guarding the snapshot.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    /// Block until this process holds the snapshot lock. Dropping the file
    /// releases it.
    fn lock(&self) -> std::io::Result<File> {
        self.create_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock_exclusive()?;
        Ok(file)
    }

    /// Fold in the snapshot on disk, keeping the higher count per id.
    fn merge_from_disk(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let on_disk = Self::load(&self.path)?;
        for (id, count) in on_disk.counts {
            let entry = self.counts.entry(id).or_insert(0);
            *entry = (*entry).max(count);
        }
        Ok(())
    }

    /// Stored count for `id`, 0 if never selected.
    #[must_use]
    pub fn count(&self, id: &str) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// All counters, most used first; equal counts ordered by id.
    #[must_use]
    pub fn entries_by_count(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
