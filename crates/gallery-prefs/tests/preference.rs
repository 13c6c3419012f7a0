use std::fs;

use gallery_prefs::{
    Error, FileStore, MemoryStore, PreferenceStore, VIEW_MODE_KEY, ViewMode, ViewModePreference,
};
use tempfile::tempdir;

#[test]
fn test_absent_preference_defaults_to_grid() {
    let pref = ViewModePreference::new(MemoryStore::new());
    assert_eq!(pref.load(None), ViewMode::Grid);
    assert_eq!(pref.load(Some("page=3")), ViewMode::Grid);
}

#[test]
fn test_saved_mode_is_loaded_back() {
    let pref = ViewModePreference::new(MemoryStore::new());
    let query = pref.save(ViewMode::List, None).unwrap();

    assert_eq!(query, "view=list");
    assert_eq!(pref.load(None), ViewMode::List);
}

#[test]
fn test_url_param_wins_over_store() {
    let store = MemoryStore::new();
    store.set(VIEW_MODE_KEY, "list").unwrap();
    let pref = ViewModePreference::new(store);

    assert_eq!(pref.load(Some("?view=grid")), ViewMode::Grid);
    assert_eq!(pref.load(Some("?view=bogus")), ViewMode::List);
}

#[test]
fn test_unknown_stored_value_falls_back() {
    let store = MemoryStore::new();
    store.set(VIEW_MODE_KEY, "carousel").unwrap();
    let pref = ViewModePreference::new(store);

    assert_eq!(pref.load(None), ViewMode::Grid);
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    let pref = ViewModePreference::new(FileStore::new(&path));
    pref.save(ViewMode::List, Some("page=2")).unwrap();

    let reopened = ViewModePreference::new(FileStore::new(&path));
    assert_eq!(reopened.load(None), ViewMode::List);
    assert!(fs::read_to_string(&path).unwrap().contains("viewMode = \"list\""));
}

#[test]
fn test_file_store_keeps_other_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    fs::write(&path, "theme = \"dark\"\n").unwrap();

    let store = FileStore::new(&path);
    store.set(VIEW_MODE_KEY, "grid").unwrap();

    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(store.get(VIEW_MODE_KEY).unwrap().as_deref(), Some("grid"));
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.toml"));
    assert_eq!(store.get(VIEW_MODE_KEY).unwrap(), None);
}

#[test]
fn test_malformed_file_is_reported_and_load_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    fs::write(&path, "this is = = not toml").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get(VIEW_MODE_KEY), Err(Error::Parse { .. })));

    let pref = ViewModePreference::new(store);
    assert_eq!(pref.load(None), ViewMode::Grid);
}
