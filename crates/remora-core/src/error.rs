use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Profiles directory could not be determined: {0}")]
    ProfilesDirUnresolved(String),

    #[error("Not a profile file: {}", .0.display())]
    NotAProfile(PathBuf),

    #[error("Usage snapshot {} is corrupt: {source}", .path.display())]
    UsageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to persist usage snapshot to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
