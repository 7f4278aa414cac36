//! Tests for `ProfileIndex`: directory scanning, ordering, fallbacks and
//! lookups.

use super::fixtures::*;
use crate::profile::{DEFAULT_SUFFIX, ProfileIndex};
use std::path::{Path, PathBuf};

#[test]
fn test_scan_keeps_only_suffix_matches() {
    let dir = make_profiles_dir();
    write_profile(dir.path(), "notes.txt", "name=Not a profile\n");
    write_profile(dir.path(), "remmina.pref", "name=Prefs\n");

    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);

    assert_eq!(index.len(), 3);
    assert!(index.iter().all(|r| r.path.extension().unwrap() == "remmina"));
}

#[test]
fn test_scan_sorted_by_full_path() {
    let dir = make_profiles_dir();
    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);

    let ids: Vec<&str> = index.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["build-box", "media", "office-pc"]);
}

#[test]
fn test_scan_order_is_bytewise() {
    let dir = tempfile::tempdir().unwrap();
    write_profile(dir.path(), "b.remmina", "");
    write_profile(dir.path(), "B.remmina", "");
    write_profile(dir.path(), "a-b.remmina", "");
    write_profile(dir.path(), "a.remmina", "");

    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);
    let ids: Vec<&str> = index.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B", "a-b", "a", "b"]);
}

#[test]
fn test_scan_is_not_recursive() {
    let dir = make_profiles_dir();
    let nested = dir.path().join("archive");
    std::fs::create_dir(&nested).unwrap();
    write_profile(&nested, "old.remmina", "name=Old\n");

    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);
    assert!(index.get_by_id("old").is_none());
}

#[test]
fn test_scan_populates_fields() {
    let dir = make_profiles_dir();
    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);

    let record = index.get_by_id("build-box").unwrap();
    assert_eq!(record.title, "Build Box");
    assert_eq!(record.protocol, "ssh");
    assert_eq!(record.description, "ssh://ci@10.0.0.7:22  | Infra");
    assert_eq!(record.path, dir.path().join("build-box.remmina"));
}

#[test]
fn test_scan_nameless_profile_uses_id_as_title() {
    let dir = tempfile::tempdir().unwrap();
    write_profile(dir.path(), "1700000000000.remmina", "server=x\n");

    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);
    assert_eq!(index.records()[0].title, "1700000000000");
}

#[test]
fn test_scan_unreadable_entry_gets_fallback_record() {
    let dir = make_profiles_dir();
    std::fs::create_dir(dir.path().join("weird.remmina")).unwrap();

    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);
    assert_eq!(index.len(), 4);

    let record = index.get_by_id("weird").unwrap();
    assert_eq!(record.protocol, "rdp");
    assert_eq!(record.title, "weird");
    assert!(record.description.is_empty());
}

#[test]
fn test_scan_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let index = ProfileIndex::scan(&dir.path().join("gone"), DEFAULT_SUFFIX);
    assert!(index.is_empty());
}

#[test]
fn test_try_scan_missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ProfileIndex::try_scan(&dir.path().join("gone"), DEFAULT_SUFFIX).is_err());
}

#[test]
fn test_scan_custom_suffix() {
    let dir = tempfile::tempdir().unwrap();
    write_profile(dir.path(), "a.conn", "name=A\n");
    write_profile(dir.path(), "b.remmina", "name=B\n");

    let index = ProfileIndex::scan(dir.path(), ".conn");
    assert_eq!(index.len(), 1);
    assert_eq!(index.records()[0].title, "A");
}

#[test]
fn test_rescan_reflects_new_files() {
    let dir = make_profiles_dir();
    assert_eq!(ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX).len(), 3);

    write_profile(dir.path(), "new.remmina", "name=New\n");
    assert_eq!(ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX).len(), 4);
}

#[test]
fn test_resolve_by_path_then_id() {
    let dir = make_profiles_dir();
    let index = ProfileIndex::scan(dir.path(), DEFAULT_SUFFIX);
    let path = dir.path().join("media.remmina");

    assert_eq!(index.resolve(path.to_str().unwrap()).unwrap().id, "media");
    assert_eq!(index.resolve("media").unwrap().path, path);
    assert!(index.resolve("nope").is_none());
    assert!(index.get_by_path(Path::new("/elsewhere/media.remmina")).is_none());
}

#[test]
fn test_duplicate_ids_kept_and_first_path_wins_lookup() {
    let index = ProfileIndex::from_records(vec![
        make_simple_record("a/dup.remmina", "First", "one"),
        make_simple_record("b/dup.remmina", "Second", "two"),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.get_by_id("dup").unwrap().title, "First");
    assert_eq!(
        index
            .get_by_path(&PathBuf::from("/profiles/b/dup.remmina"))
            .unwrap()
            .title,
        "Second"
    );
}
