//! Locating and starting the Remmina client for a chosen profile.

use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const REMMINA_BINARY: &str = "remmina";

/// Find `name` in the directories of `path_var` (a `PATH`-style list).
fn find_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// The launcher executable: the configured one, else `remmina` from `PATH`.
pub fn resolve_launcher(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if !path.is_file() {
            bail!("Configured launcher {} does not exist", path.display());
        }
        return Ok(path.to_path_buf());
    }

    let path_var = std::env::var_os("PATH").unwrap_or_default();
    find_in_path(REMMINA_BINARY, &path_var)
        .context("Remmina executable could not be found in PATH; set launcher.executable")
}

/// Command line that opens `profile` with `launcher`.
pub fn launch_command(launcher: &Path, profile: &Path) -> Command {
    let mut command = Command::new(launcher);
    command.arg("-c").arg(profile);
    command
}

/// Start the launcher detached from our stdio.
pub fn spawn(launcher: &Path, profile: &Path) -> Result<()> {
    launch_command(launcher, profile)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {}", launcher.display()))?;
    Ok(())
}
