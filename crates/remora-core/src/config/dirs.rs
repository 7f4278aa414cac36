use super::ProfilesConfig;
use crate::{Error, Result};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Remmina profile locations relative to `$HOME`, in lookup order.
/// When several exist the last one wins.
const DEFAULT_PROFILE_DIRS: [&str; 2] = [".local/share/remmina", ".remmina"];

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/remora)
    pub config: PathBuf,

    /// Data directory (~/.local/share/remora)
    pub data: PathBuf,

    /// Config file path
    pub config_file: PathBuf,

    /// Usage snapshot
    pub usage_file: PathBuf,

    /// User home, used for `~` expansion and the default profile locations
    pub home: Option<PathBuf>,
}

impl Directories {
    /// Standard XDG paths for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no home directory can be determined.
    pub fn new() -> Result<Self> {
        let project = ProjectDirs::from("", "", "remora").ok_or_else(|| {
            Error::Config("Failed to determine project directories".to_string())
        })?;

        let config = project.config_dir().to_path_buf();
        let data = project.data_dir().to_path_buf();

        Ok(Self {
            config_file: config.join("config.json"),
            usage_file: data.join("usage.json"),
            config,
            data,
            home: BaseDirs::new().map(|base| base.home_dir().to_path_buf()),
        })
    }

    /// Everything under `base`, which also stands in for `$HOME`.
    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            usage_file: base.join("usage.json"),
            config: base.clone(),
            data: base.clone(),
            home: Some(base),
        }
    }

    /// Ensure all directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(&self.data)?;
        Ok(())
    }
}

/// Expand a leading `~` component to `home`.
///
/// Returns `None` if the path needs a home directory and none is known.
#[must_use]
pub fn expand_home(path: &Path, home: Option<&Path>) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => home.map(|h| h.join(rest)),
        Err(_) => Some(path.to_path_buf()),
    }
}

/// Determine the profiles directory.
///
/// A configured directory is used as-is after `~` expansion, even if it does
/// not exist yet; scans of a missing directory are simply empty. Without one,
/// the Remmina default locations under `home` are tried.
///
/// # Errors
///
/// Returns [`Error::ProfilesDirUnresolved`] if the configured path is empty or
/// cannot be expanded, or if nothing is configured and no default location
/// exists.
pub fn resolve_profiles_dir(profiles: &ProfilesConfig, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(configured) = &profiles.directory {
        if configured.as_os_str().is_empty() {
            return Err(Error::ProfilesDirUnresolved(
                "profiles.directory is empty".to_string(),
            ));
        }
        let dir = expand_home(configured, home).ok_or_else(|| {
            Error::ProfilesDirUnresolved(format!(
                "cannot expand {} without a home directory",
                configured.display()
            ))
        })?;
        debug!("Using configured profiles directory {}", dir.display());
        return Ok(dir);
    }

    let home = home.ok_or_else(|| {
        Error::ProfilesDirUnresolved("no home directory to look for profiles in".to_string())
    })?;

    DEFAULT_PROFILE_DIRS
        .iter()
        .rev()
        .map(|relative| home.join(relative))
        .find(|candidate| candidate.is_dir())
        .inspect(|dir| debug!("Using default profiles directory {}", dir.display()))
        .ok_or_else(|| {
            Error::ProfilesDirUnresolved(format!(
                "none of ~/{} exists; set profiles.directory",
                DEFAULT_PROFILE_DIRS.join(", ~/")
            ))
        })
}
