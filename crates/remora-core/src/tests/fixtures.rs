//! Test fixtures and helpers

use crate::profile::{ProfileRecord, parse};
use crate::usage::UsageStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A typical RDP profile as Remmina writes it
pub const RDP_PROFILE: &str = "\
[remmina]
name=Office PC
group=Work
server=host.example
protocol=RDP
username=user
resolution_mode=2
";

/// Build a record as if `text` had been read from `/profiles/<file_name>`.
pub fn make_record(file_name: &str, text: &str) -> ProfileRecord {
    ProfileRecord::new(PathBuf::from("/profiles").join(file_name), parse(text))
}

/// Record with only a name and server
pub fn make_simple_record(file_name: &str, name: &str, server: &str) -> ProfileRecord {
    make_record(file_name, &format!("name={name}\nserver={server}\nprotocol=ssh\n"))
}

/// Write a profile file into `dir`.
pub fn write_profile(dir: &Path, file_name: &str, text: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, text).unwrap();
    path
}

/// In-memory usage store with the given counts (not persisted).
pub fn make_usage(counts: &[(&str, u64)]) -> UsageStore {
    let mut store = UsageStore::new(PathBuf::from("/nonexistent/usage.json"));
    for (id, count) in counts {
        for _ in 0..*count {
            store.increment(id);
        }
    }
    store
}

/// Temp directory populated with a few profiles
pub fn make_profiles_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_profile(dir.path(), "office-pc.remmina", RDP_PROFILE);
    write_profile(
        dir.path(),
        "build-box.remmina",
        "name=Build Box\nserver=10.0.0.7:22\nprotocol=SSH\nusername=ci\ngroup=Infra\n",
    );
    write_profile(
        dir.path(),
        "media.remmina",
        "name=Media Center\nserver=media.lan\nprotocol=vnc\n",
    );
    dir
}
