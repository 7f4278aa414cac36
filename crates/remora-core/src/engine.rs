use crate::config::{Config, Directories, expand_home, resolve_profiles_dir};
use crate::profile::{ProfileIndex, ProfileRecord};
use crate::query::{ProfileEntry, query};
use crate::usage::UsageStore;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Query and selection entry point.
///
/// Owns the usage store for the life of the process. Every query takes a
/// fresh scan of the profiles directory; there is no file watching.
pub struct Remora {
    config: Config,
    profiles_dir: PathBuf,
    usage: UsageStore,
}

/// Outcome of a selection event
#[derive(Debug, Clone)]
pub struct Selection {
    pub record: ProfileRecord,
    /// Usage count after this selection
    pub uses: u64,
}

impl Remora {
    /// Resolve the profiles directory and load the usage snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfilesDirUnresolved`] if no profiles directory can
    /// be determined, and [`Error::UsageCorrupt`] or [`Error::Io`] if the
    /// usage snapshot cannot be loaded.
    pub fn new(config: Config, dirs: &Directories) -> Result<Self> {
        let home = dirs.home.as_deref();
        let profiles_dir = resolve_profiles_dir(&config.profiles, home)?;

        let usage_file = match &config.usage_file {
            Some(path) => expand_home(path, home).ok_or_else(|| {
                Error::Config(format!("cannot expand usageFile {}", path.display()))
            })?,
            None => dirs.usage_file.clone(),
        };

        Self::with_paths(config, profiles_dir, &usage_file)
    }

    /// Use explicit locations, bypassing directory discovery.
    ///
    /// # Errors
    ///
    /// Returns an error if the usage snapshot cannot be loaded.
    pub fn with_paths(config: Config, profiles_dir: PathBuf, usage_file: &Path) -> Result<Self> {
        let usage = UsageStore::load(usage_file)?;
        info!(
            "Profiles from {}, usage in {}",
            profiles_dir.display(),
            usage_file.display()
        );

        Ok(Self {
            config,
            profiles_dir,
            usage,
        })
    }

    /// Take a fresh snapshot of the profiles directory.
    #[must_use]
    pub fn scan(&self) -> ProfileIndex {
        ProfileIndex::scan(&self.profiles_dir, &self.config.profiles.suffix)
    }

    /// Ranked matches for `raw`, bounded by `search.maxResults`.
    #[must_use]
    pub fn query(&self, raw: &str) -> Vec<ProfileEntry> {
        self.query_with_limit(raw, self.config.search.max_results)
    }

    #[must_use]
    pub fn query_with_limit(&self, raw: &str, limit: usize) -> Vec<ProfileEntry> {
        let index = self.scan();
        query(&index, raw, &self.usage, limit)
    }

    /// Record that the user picked a profile, by file path or id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileNotFound`] if the selector matches nothing in
    /// the current directory, and [`Error::Persist`] if the usage snapshot
    /// cannot be written. In the latter case the in-memory count has still
    /// been incremented. [`Error::UsageCorrupt`] if another writer left the
    /// snapshot unreadable since it was loaded.
    pub fn select(&mut self, selector: &str) -> Result<Selection> {
        let index = self.scan();
        let record = index
            .resolve(selector)
            .cloned()
            .ok_or_else(|| Error::ProfileNotFound(selector.to_string()))?;

        let uses = match self.usage.record(&record.id) {
            Ok(uses) => uses,
            Err(e) => {
                warn!("Selection of {} not persisted: {}", record.id, e);
                return Err(e);
            }
        };

        debug!("Selected {} ({})", record.id, record.path.display());
        Ok(Selection { record, uses })
    }

    #[must_use]
    pub fn usage(&self) -> &UsageStore {
        &self.usage
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }
}
