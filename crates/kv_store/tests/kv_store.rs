use std::fs;
use std::path::PathBuf;

use kv_store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
use tempfile::TempDir;

fn state_file(contents: Option<&str>) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("state.json");
    if let Some(contents) = contents {
        fs::write(&path, contents).expect("state file should be written");
    }
    (dir, path)
}

#[test]
fn memory_store_round_trips_and_removes_values() {
    let store = MemoryStore::with_entries([("termfolio.theme", "nord")]);

    assert_eq!(
        store.get("termfolio.theme").expect("get"),
        Some("nord".to_string())
    );
    store.set("termfolio.theme", "matrix").expect("set");
    assert_eq!(
        store.get("termfolio.theme").expect("get"),
        Some("matrix".to_string())
    );
    store.remove("termfolio.theme").expect("remove");
    assert_eq!(store.get("termfolio.theme").expect("get"), None);
}

#[test]
fn open_missing_file_yields_empty_store_without_creating_it() {
    let (_dir, path) = state_file(None);

    let store = JsonFileStore::open(&path).expect("missing file should open");

    assert_eq!(store.get("anything").expect("get"), None);
    assert!(!path.exists());
}

#[test]
fn open_empty_file_yields_empty_store() {
    let (_dir, path) = state_file(Some("   \n"));

    let store = JsonFileStore::open(&path).expect("blank file should open");
    assert_eq!(store.get("termfolio.history").expect("get"), None);
}

#[test]
fn set_persists_values_across_reopen() {
    let (_dir, path) = state_file(None);

    {
        let store = JsonFileStore::open(&path).expect("open");
        store
            .set("termfolio.history", r#"["ls","whoami"]"#)
            .expect("set history");
        store.set("termfolio.theme", "dracula").expect("set theme");
    }

    let reopened = JsonFileStore::open(&path).expect("reopen");
    assert_eq!(
        reopened.get("termfolio.history").expect("get"),
        Some(r#"["ls","whoami"]"#.to_string())
    );
    assert_eq!(
        reopened.get("termfolio.theme").expect("get"),
        Some("dracula".to_string())
    );
}

#[test]
fn set_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("termfolio").join("state.json");

    let store = JsonFileStore::open(&path).expect("open");
    store.set("termfolio.theme", "nord").expect("set");

    assert!(path.exists());
}

#[test]
fn writes_leave_no_temp_files_behind() {
    let (dir, path) = state_file(None);
    let store = JsonFileStore::open(&path).expect("open");

    store.set("a", "1").expect("set a");
    store.set("b", "2").expect("set b");
    store.remove("a").expect("remove a");

    let names = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect::<Vec<_>>();
    assert_eq!(names, vec![std::ffi::OsString::from("state.json")]);

    let reopened = JsonFileStore::open(&path).expect("reopen");
    assert_eq!(reopened.get("a").expect("get"), None);
    assert_eq!(reopened.get("b").expect("get"), Some("2".to_string()));
}

#[test]
fn open_rejects_malformed_json() {
    let (_dir, path) = state_file(Some("{ not json"));

    let error = JsonFileStore::open(&path).expect_err("malformed file must fail");
    assert!(matches!(error, StoreError::Parse { .. }));
}

#[test]
fn open_rejects_non_object_root() {
    let (_dir, path) = state_file(Some(r#"["ls"]"#));

    let error = JsonFileStore::open(&path).expect_err("array root must fail");
    assert!(matches!(error, StoreError::InvalidShape { .. }));
}

#[test]
fn open_rejects_non_string_values() {
    let (_dir, path) = state_file(Some(r#"{"termfolio.theme": 3}"#));

    let error = JsonFileStore::open(&path).expect_err("numeric value must fail");
    assert!(matches!(error, StoreError::InvalidShape { .. }));
}

#[test]
fn failed_write_keeps_previous_in_memory_value() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let blocker = dir.path().join("blocker");
    let path = blocker.join("state.json");

    let store = JsonFileStore::open(&path).expect("missing file opens empty");
    fs::write(&blocker, "file, not a directory").expect("blocker should be written");
    let error = store
        .set("termfolio.theme", "nord")
        .expect_err("parent is a regular file");

    assert!(matches!(error, StoreError::Io { .. }));
    assert_eq!(store.get("termfolio.theme").expect("get"), None);
}
