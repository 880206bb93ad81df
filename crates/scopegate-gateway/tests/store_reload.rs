#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::sync::Arc;

use scopegate_gateway::config::{EntitlementsSection, ReloadMode};
use scopegate_gateway::store::EntitlementStore;

const ONE: &str = r#"{"entitlements":[{"entitlementId":"e1","subject":{"type":"partner","id":"P1"},"action":"invoke"}]}"#;
const TWO: &str = r#"{"entitlements":[
  {"entitlementId":"e1","subject":{"type":"partner","id":"P1"},"action":"invoke"},
  {"entitlementId":"e2","subject":{"type":"partner","id":"P1"},"action":"view"}
]}"#;

fn section(path: &std::path::Path, reload: ReloadMode) -> EntitlementsSection {
    EntitlementsSection {
        path: path.to_string_lossy().into_owned(),
        reload,
        ..EntitlementsSection::default()
    }
}

#[tokio::test]
async fn loads_at_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entitlements.json");
    fs::write(&path, ONE).unwrap();

    let store = EntitlementStore::open(&section(&path, ReloadMode::Startup)).await;
    assert!(store.is_ready());
    assert_eq!(store.current().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_file_is_not_ready() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let store = EntitlementStore::open(&section(&path, ReloadMode::Startup)).await;
    assert!(!store.is_ready());
    let err = store.current().expect_err("must fail");
    assert_eq!(err.code().as_str(), "POLICY_UNAVAILABLE");
}

#[tokio::test]
async fn reload_swaps_without_touching_held_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entitlements.json");
    fs::write(&path, ONE).unwrap();

    let store = EntitlementStore::open(&section(&path, ReloadMode::Interval)).await;
    let held = store.current().unwrap();

    fs::write(&path, TWO).unwrap();
    assert_eq!(store.reload().await.unwrap().len(), 2);

    assert_eq!(held.len(), 1);
    let fresh = store.current().unwrap();
    assert_eq!(fresh.len(), 2);
    assert!(!Arc::ptr_eq(&held, &fresh));
}

#[tokio::test]
async fn corrupt_reload_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entitlements.json");
    fs::write(&path, ONE).unwrap();

    let store = EntitlementStore::open(&section(&path, ReloadMode::Interval)).await;
    assert!(store.is_ready());

    fs::write(&path, "{ \"entitlements\": [ ").unwrap();
    assert!(store.reload().await.is_err());
    assert!(!store.is_ready(), "stale snapshot must not be served");

    fs::write(&path, ONE).unwrap();
    assert_eq!(store.reload().await.unwrap().len(), 1);
    assert!(store.is_ready());
}

#[tokio::test]
async fn per_request_mode_reads_latest_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entitlements.json");
    fs::write(&path, ONE).unwrap();

    let store = EntitlementStore::open(&section(&path, ReloadMode::PerRequest)).await;
    assert_eq!(store.snapshot_for_request().await.unwrap().len(), 1);

    fs::write(&path, TWO).unwrap();
    assert_eq!(store.snapshot_for_request().await.unwrap().len(), 2);

    fs::remove_file(&path).unwrap();
    assert!(store.snapshot_for_request().await.is_err());
}

#[tokio::test]
async fn per_request_hands_back_its_own_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entitlements.json");
    fs::write(&path, TWO).unwrap();

    let store = EntitlementStore::open(&section(&path, ReloadMode::PerRequest)).await;
    let mine = store.snapshot_for_request().await.unwrap();
    assert!(Arc::ptr_eq(&mine, &store.current().unwrap()));

    // A later failed load replaces the store state but not a snapshot already handed out.
    fs::write(&path, "{ broken").unwrap();
    assert!(store.reload().await.is_err());
    assert!(store.current().is_err());
    assert_eq!(mine.len(), 2);
}
