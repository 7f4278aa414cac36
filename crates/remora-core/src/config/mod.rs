mod dirs;
mod settings;
mod validation;

pub use dirs::{Directories, expand_home, resolve_profiles_dir};
pub use settings::{Config, LauncherConfig, ProfilesConfig, SearchConfig};
pub use validation::warn_unknown_fields;
