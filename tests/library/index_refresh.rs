//! Integration tests for loading the index from disk and refreshing the store.

use std::sync::Arc;

use libmgr as crate_root;

use crate_root::index::{IndexProvider, IndexStore, LibraryIndex, RefreshOutcome, load_index};
use crate_root::logic::LibraryView;
use crate_root::state::{CategoryFilter, FilterState, TypeFilter};
use tokio::sync::watch;

use super::common::{INDEX_JSON, INSTALLED_JSON, fixture_index};

#[test]
/// What: Index and installed listing load from files
///
/// Inputs:
/// - Fixture documents written to a temp dir.
///
/// Output:
/// - Same libraries as the in-memory fixture; a missing file is an error.
fn load_index_from_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index_path = dir.path().join("library_index.json");
    let installed_path = dir.path().join("installed.json");
    std::fs::write(&index_path, INDEX_JSON).expect("write index");
    std::fs::write(&installed_path, INSTALLED_JSON).expect("write installed");

    let idx = load_index(&index_path, Some(&installed_path)).expect("load");
    assert_eq!(idx.len(), fixture_index().len());
    assert!(idx.find("Servo").and_then(|l| l.installed()).is_some());

    let bare = load_index(&index_path, None).expect("load without installed");
    assert!(bare.find("Servo").and_then(|l| l.installed()).is_none());
    assert!(bare.find("MyLocalLib").is_none());

    assert!(load_index(&dir.path().join("missing.json"), None).is_err());
}

#[test]
/// What: Chooser lists come from the snapshot in chooser order
///
/// Inputs:
/// - Store holding the fixture snapshot.
///
/// Output:
/// - Sorted categories; known types first in their fixed order.
fn provider_lists_choices() {
    let store = IndexStore::new(fixture_index());
    assert_eq!(
        store.categories(),
        vec![
            "Communication",
            "Data Processing",
            "Device Control",
            "Display",
            "Signal Input/Output"
        ]
    );
    assert_eq!(store.types(), vec!["Arduino", "Recommended", "Contributed"]);
    assert_eq!(store.libraries().len(), 6);
}

#[tokio::test]
/// What: Refresh swaps the snapshot; readers holding the old one are unaffected
///
/// Inputs:
/// - Store with an empty snapshot; a fetch returning the fixture.
///
/// Output:
/// - `Replaced`; the earlier snapshot is still empty, the new one has six libraries.
async fn refresh_swaps_snapshot() {
    let store = IndexStore::new(LibraryIndex::default());
    let before = store.snapshot();
    let (_tx, rx) = watch::channel(false);
    let out = store
        .refresh(async { Ok::<_, String>(fixture_index()) }, rx)
        .await;
    assert_eq!(out, Ok(RefreshOutcome::Replaced));
    assert!(before.is_empty());
    assert_eq!(store.snapshot().len(), 6);
}

#[tokio::test]
/// What: Cancelling a refresh keeps the previous snapshot
///
/// Inputs:
/// - Fetch that never completes; cancel signal sent.
///
/// Output:
/// - `Cancelled`; snapshot unchanged and the store accepts a new refresh.
async fn cancelled_refresh_keeps_snapshot() {
    let store = IndexStore::new(fixture_index());
    let (tx, rx) = watch::channel(false);
    let never = std::future::pending::<Result<LibraryIndex, String>>();
    let (out, ()) = tokio::join!(store.refresh(never, rx), async {
        let _ = tx.send(true);
    });
    assert_eq!(out, Ok(RefreshOutcome::Cancelled));
    assert_eq!(store.snapshot().len(), 6);
    assert!(!store.is_refreshing());
}

#[tokio::test]
/// What: A failed refresh returns the error and keeps the snapshot
///
/// Inputs:
/// - Fetch failing with a message.
///
/// Output:
/// - Error passed through; snapshot unchanged.
async fn failed_refresh_keeps_snapshot() {
    let store = IndexStore::new(fixture_index());
    let (_tx, rx) = watch::channel(false);
    let out = store
        .refresh(async { Err::<LibraryIndex, _>("daemon offline".to_string()) }, rx)
        .await;
    assert_eq!(out, Err("daemon offline".to_string()));
    assert_eq!(store.snapshot().len(), 6);
}

#[test]
/// What: Filter controls reset only when the chooser lists change
///
/// Inputs:
/// - View filtered to category `Display` and type `Recommended`; same snapshot
///   re-applied, then a snapshot without those entries.
///
/// Output:
/// - First replacement keeps the filter; second resets category and type.
fn view_resets_filters_when_choices_change() {
    let mut view = LibraryView::new(&Arc::new(fixture_index()), "Arduino");
    view.set_filter(
        FilterState::from_query("graphics")
            .with_category(CategoryFilter::Category("Display".into()))
            .with_kind(TypeFilter::Type("Recommended".into())),
    );
    assert_eq!(view.len(), 1);
    assert!(!view.replace_snapshot(&Arc::new(fixture_index())));
    assert_eq!(view.len(), 1);

    let smaller = LibraryIndex::from_parts(
        crate_root::index::parse_index(
            r#"{"libraries": [{"name": "Wire", "version": "1.0", "category": "Communication", "types": ["Arduino"]}]}"#,
        )
        .expect("parse"),
        &[],
    );
    assert!(view.replace_snapshot(&Arc::new(smaller)));
    assert_eq!(view.filter().category, CategoryFilter::All);
    assert_eq!(view.filter().kind, TypeFilter::All);
}
