// ==========================
// crates/session-lib/tests/auth_restore.rs
// ==========================
use liveclass_common::UserRecord;
use liveclass_session_lib::auth::AuthCache;
use liveclass_session_lib::storage::{FlatFileStore, KeyValueStore, TOKEN_KEY, USER_DATA_KEY};
use tempfile::TempDir;

fn student_record() -> UserRecord {
    UserRecord::new("tok-9000")
        .with_field("name", serde_json::json!("Jane Smith"))
        .with_field("email", serde_json::json!("jane@example.edu"))
}

#[tokio::test]
async fn session_survives_a_restart_on_disk() {
    let temp_dir = TempDir::new().unwrap();

    // first run: log in and let the slots hit disk
    {
        let store = FlatFileStore::new(temp_dir.path()).unwrap();
        let cache = AuthCache::new(store);
        cache.login(student_record()).await.unwrap();
    }

    // second run over the same directory restores the same record
    let store = FlatFileStore::new(temp_dir.path()).unwrap();
    let cache = AuthCache::restore(store).await;

    assert_eq!(cache.current_user().await, Some(student_record()));
}

#[tokio::test]
async fn externally_removed_token_logs_the_user_out() {
    let temp_dir = TempDir::new().unwrap();
    let store = FlatFileStore::new(temp_dir.path()).unwrap();

    let cache = AuthCache::new(store.clone());
    cache.login(student_record()).await.unwrap();

    // something else cleared the token slot between runs
    store.remove(TOKEN_KEY).await.unwrap();

    let cache = AuthCache::restore(store).await;
    assert!(!cache.is_authenticated().await);
}

#[tokio::test]
async fn corrupted_record_on_disk_degrades_to_logged_out() {
    let temp_dir = TempDir::new().unwrap();
    let store = FlatFileStore::new(temp_dir.path()).unwrap();

    store.put(TOKEN_KEY, "tok-9000").await.unwrap();
    store.put(USER_DATA_KEY, "{\"token\": ").await.unwrap();

    let cache = AuthCache::restore(store.clone()).await;

    assert!(!cache.is_authenticated().await);
    // the dangling token was cleared so later runs start clean
    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn logout_then_restart_stays_logged_out() {
    let temp_dir = TempDir::new().unwrap();
    let store = FlatFileStore::new(temp_dir.path()).unwrap();

    let cache = AuthCache::new(store.clone());
    cache.login(student_record()).await.unwrap();
    cache.logout().await.unwrap();

    let cache = AuthCache::restore(store).await;
    assert!(!cache.is_authenticated().await);
}
