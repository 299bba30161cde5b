//! On-disk store tests.

#![cfg(feature = "kv")]

use std::collections::HashMap;

use gift_survey::prelude::*;
use gift_survey::store::{PROGRESS_KEY, THEME_KEY};

fn catalog() -> Catalog {
    Catalog::new(
        (0..50).map(|i| format!("Q{}", i + 1)).collect(),
        (0..25).map(|i| format!("gift-{i}")).collect(),
        HashMap::new(),
    )
    .unwrap()
}

#[test]
fn open_requires_init() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("store");
    let err = FjallStore::open(&missing).err().unwrap();
    assert!(matches!(err, StorageError::NotInitialized(_)));
}

#[test]
fn set_get_delete_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FjallStore::init(dir.path()).unwrap();

    assert_eq!(store.get("theme").unwrap(), None);
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(store.keys(), vec!["theme".to_string()]);

    store.delete("theme").unwrap();
    assert_eq!(store.get("theme").unwrap(), None);
    store.delete("theme").unwrap();
}

#[test]
fn session_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FjallStore::init(dir.path()).unwrap();
        let mut session = Session::open(catalog(), store).unwrap();
        session.go_to(10);
        session.select_current(2).unwrap();
        session.set_theme(Theme::Dark).unwrap();
    }

    let store = FjallStore::open(dir.path()).unwrap();
    assert!(store.keys().contains(&PROGRESS_KEY.to_string()));
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    let mut session = Session::open(catalog(), store).unwrap();
    assert_eq!(session.current_index(), Some(10));
    assert_eq!(session.selected(10), Some(Rating::clamped(2)));
    assert_eq!(session.theme(), Theme::Dark);

    for index in 0..session.question_count() {
        session.select_rating(index, 1).unwrap();
    }
    let id = session.submit().unwrap().id;
    drop(session);

    let store = FjallStore::open(dir.path()).unwrap();
    assert!(!store.keys().contains(&PROGRESS_KEY.to_string()));
    let session = Session::open(catalog(), store).unwrap();
    assert_eq!(session.history().len(), 1);
    assert!(session.history_entry(id).is_some());
    assert_eq!(session.survey().answers().answered_count(), 0);
}

#[test]
fn init_keeps_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = FjallStore::init(dir.path()).unwrap();
        store.set("theme", "dark").unwrap();
    }
    let store = FjallStore::init(dir.path()).unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
}
