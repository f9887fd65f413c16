// ============================
// crates/session-lib/src/lib.rs
// ============================
//! Client-side session state engine for the `liveclass` conferencing UI.

pub mod auth;
pub mod config;
pub mod controls;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod roster;
pub mod session_actor;
pub mod storage;
pub mod toast;

use crate::auth::AuthCache;
use crate::config::Settings;
use crate::session_actor::{spawn_session, SessionHandle};
use crate::storage::KeyValueStore;
use crate::toast::ToastManager;
use liveclass_common::{BreakoutRoom, Participant};
use std::sync::Arc;

/// Everything an embedding UI holds onto: the session actor handle, the
/// toast queue and the restored auth cache.
pub struct ClientState<S> {
    /// Live session state behind its actor task
    pub session: SessionHandle,
    /// Toast notification queue
    pub toasts: ToastManager,
    /// Auth session cache over the injected store
    pub auth: Arc<AuthCache<S>>,
    /// Resolved settings
    pub settings: Arc<Settings>,
}

impl<S: KeyValueStore> ClientState<S> {
    /// Restore the auth session from `store`, spawn the session actor over
    /// the seeded collections and wire up the toast queue.
    pub async fn new(
        store: S,
        settings: Settings,
        participants: Vec<Participant>,
        rooms: Vec<BreakoutRoom>,
    ) -> Self {
        let auth = Arc::new(AuthCache::restore(store).await);
        let toasts = ToastManager::new(settings.toast_ttl());
        let session = spawn_session(participants, rooms, settings.event_capacity);

        Self {
            session,
            toasts,
            auth,
            settings: Arc::new(settings),
        }
    }
}

impl<S> Clone for ClientState<S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            toasts: self.toasts.clone(),
            auth: Arc::clone(&self.auth),
            settings: Arc::clone(&self.settings),
        }
    }
}
