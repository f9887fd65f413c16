// ============================
// crates/session-lib/src/toast.rs
// ============================
//! Bounded-lifetime toast notifications.
//!
//! `show` appends an entry and schedules its own removal after the configured
//! lifetime. Each toast carries an independent, cancellable expiry timer;
//! there is no deduplication and no cap on the concurrent count.
use crate::metrics::{TOAST_ACTIVE, TOAST_DISMISSED, TOAST_EXPIRED, TOAST_SHOWN};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use liveclass_common::ToastKind;
use metrics::{counter, gauge};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tokio::time::sleep;

/// One live notification
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: DateTime<Utc>,
}

/// Cloneable handle over the shared toast list and its expiry timers
#[derive(Clone)]
pub struct ToastManager {
    toasts: Arc<RwLock<Vec<Toast>>>,
    timers: Arc<DashMap<u64, AbortHandle>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl ToastManager {
    /// Create a manager whose toasts live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(RwLock::new(Vec::new())),
            timers: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    /// Append a toast and schedule its removal. Returns the generated id.
    pub async fn show(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            message: message.into(),
            kind,
            created_at: Utc::now(),
        };

        let active = {
            let mut toasts = self.toasts.write().await;
            toasts.push(toast);
            toasts.len()
        };

        counter!(TOAST_SHOWN).increment(1);
        gauge!(TOAST_ACTIVE).set(active as f64);

        let manager = self.clone();
        let ttl = self.ttl;
        let handle = tokio::spawn(async move {
            sleep(ttl).await;
            manager.expire(id).await;
        });
        self.timers.insert(id, handle.abort_handle());

        id
    }

    /// Timer callback: drop the toast if it is still live
    async fn expire(&self, id: u64) {
        let removed = self.remove(id).await;
        self.timers.remove(&id);

        if removed {
            counter!(TOAST_EXPIRED).increment(1);
        }
    }

    /// Remove a toast early and cancel its timer.
    /// Returns whether the toast was still live.
    pub async fn dismiss(&self, id: u64) -> bool {
        if let Some((_, handle)) = self.timers.remove(&id) {
            handle.abort();
        }

        let removed = self.remove(id).await;
        if removed {
            counter!(TOAST_DISMISSED).increment(1);
        }
        removed
    }

    async fn remove(&self, id: u64) -> bool {
        let mut toasts = self.toasts.write().await;
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        let removed = toasts.len() < before;

        gauge!(TOAST_ACTIVE).set(toasts.len() as f64);
        removed
    }

    /// Snapshot of the live list, in insertion order
    pub async fn active(&self) -> Vec<Toast> {
        self.toasts.read().await.clone()
    }

    /// Abort every outstanding timer and clear the list.
    /// For embedder teardown; the manager stays usable afterwards.
    pub async fn close(&self) {
        for entry in self.timers.iter() {
            entry.value().abort();
        }
        self.timers.clear();

        self.toasts.write().await.clear();
        gauge!(TOAST_ACTIVE).set(0.0);
    }
}
