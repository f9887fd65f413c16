// ============================
// crates/session-lib/src/auth/cache.rs
// ============================
//! Locally persisted session cache.
//!
//! Holds the optional current user in memory, mirrored to two string slots in
//! the injected store: the raw token under `token` and the JSON-encoded record
//! under `userData`. Validity is decided purely by presence of the stored
//! data; there is no expiry and no server-side verification.
use crate::error::AppError;
use crate::metrics::{AUTH_LOGIN, AUTH_LOGOUT, AUTH_RESTORED, AUTH_RESTORE_REJECTED};
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_DATA_KEY};
use liveclass_common::UserRecord;
use metrics::counter;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Dependency-injected auth session cache.
///
/// Invariant: when the `token` slot is absent, the in-memory user is `None`.
pub struct AuthCache<S> {
    store: S,
    user: RwLock<Option<UserRecord>>,
}

impl<S: KeyValueStore> AuthCache<S> {
    /// Create a logged-out cache over the given store
    pub fn new(store: S) -> Self {
        Self {
            store,
            user: RwLock::new(None),
        }
    }

    /// Create a cache and run the startup check: a present token with a
    /// decodable cached record becomes the active session; anything else
    /// degrades to logged-out.
    pub async fn restore(store: S) -> Self {
        let cache = Self::new(store);
        cache.startup_check().await;
        cache
    }

    async fn startup_check(&self) {
        let token = match self.store.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(err) => {
                warn!("could not read session token, treating as logged out: {err}");
                return;
            }
        };
        if token.is_none() {
            return;
        }

        match self.store.get(USER_DATA_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => {
                    info!("restored cached session");
                    counter!(AUTH_RESTORED).increment(1);
                    *self.user.write().await = Some(user);
                }
                Err(err) => {
                    warn!("cached user record is malformed, clearing session: {err}");
                    counter!(AUTH_RESTORE_REJECTED).increment(1);
                    self.clear_token().await;
                }
            },
            Ok(None) => {
                warn!("session token present without a cached user record, clearing session");
                counter!(AUTH_RESTORE_REJECTED).increment(1);
                self.clear_token().await;
            }
            Err(err) => {
                warn!("could not read cached user record, clearing session: {err}");
                counter!(AUTH_RESTORE_REJECTED).increment(1);
                self.clear_token().await;
            }
        }
    }

    async fn clear_token(&self) {
        if let Err(err) = self.store.remove(TOKEN_KEY).await {
            warn!("could not clear session token: {err}");
        }
    }

    /// Store the record in memory and persist both slots.
    /// The record is written before the token so a partial failure never
    /// leaves a token pointing at nothing.
    pub async fn login(&self, user: UserRecord) -> Result<(), AppError> {
        let encoded = serde_json::to_string(&user)?;
        self.store.put(USER_DATA_KEY, &encoded).await?;
        self.store.put(TOKEN_KEY, &user.token).await?;

        *self.user.write().await = Some(user);

        info!("user logged in");
        counter!(AUTH_LOGIN).increment(1);
        Ok(())
    }

    /// Clear the in-memory user and remove the `token` slot.
    /// The cached record is left behind; without the token it is unreachable.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.user.write().await.take();
        self.store.remove(TOKEN_KEY).await?;

        info!("user logged out");
        counter!(AUTH_LOGOUT).increment(1);
        Ok(())
    }

    /// Snapshot of the current user, if any
    pub async fn current_user(&self) -> Option<UserRecord> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn teacher_record() -> UserRecord {
        UserRecord::new("tok-abc")
            .with_field("name", serde_json::json!("Teacher Smith"))
            .with_field("role", serde_json::json!("teacher"))
    }

    #[tokio::test]
    async fn test_login_persists_both_slots() {
        let store = MemoryStore::new();
        let cache = AuthCache::new(store.clone());

        cache.login(teacher_record()).await.unwrap();

        assert!(cache.is_authenticated().await);
        assert_eq!(
            store.get(TOKEN_KEY).await.unwrap(),
            Some("tok-abc".to_string())
        );
        let raw = store.get(USER_DATA_KEY).await.unwrap().unwrap();
        let stored: UserRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, teacher_record());
    }

    #[tokio::test]
    async fn test_restore_yields_the_logged_in_user() {
        let store = MemoryStore::new();
        let cache = AuthCache::new(store.clone());
        cache.login(teacher_record()).await.unwrap();

        // fresh cache over the same store, as after a restart
        let restored = AuthCache::restore(store).await;

        assert_eq!(restored.current_user().await, Some(teacher_record()));
    }

    #[tokio::test]
    async fn test_externally_cleared_token_means_logged_out() {
        let store = MemoryStore::new();
        let cache = AuthCache::new(store.clone());
        cache.login(teacher_record()).await.unwrap();

        store.remove(TOKEN_KEY).await.unwrap();
        let restored = AuthCache::restore(store).await;

        assert!(!restored.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_malformed_record_degrades_to_logged_out() {
        let store = MemoryStore::new();
        store.put(TOKEN_KEY, "tok-abc").await.unwrap();
        store.put(USER_DATA_KEY, "{not json").await.unwrap();

        let restored = AuthCache::restore(store.clone()).await;

        assert!(!restored.is_authenticated().await);
        // the dangling token was cleared as part of the degradation
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_token_without_record_degrades_to_logged_out() {
        let store = MemoryStore::new();
        store.put(TOKEN_KEY, "tok-abc").await.unwrap();

        let restored = AuthCache::restore(store.clone()).await;

        assert!(!restored.is_authenticated().await);
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_removes_token_only() {
        let store = MemoryStore::new();
        let cache = AuthCache::new(store.clone());
        cache.login(teacher_record()).await.unwrap();

        cache.logout().await.unwrap();

        assert!(!cache.is_authenticated().await);
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        // the record stays behind but is unreachable without the token
        assert!(store.get(USER_DATA_KEY).await.unwrap().is_some());

        let restored = AuthCache::restore(store).await;
        assert!(!restored.is_authenticated().await);
    }
}
