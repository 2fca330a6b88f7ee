//! Ledger client abstractions
//!
//! A ledger is an append-only list of string-encoded amounts stored under a
//! user-scoped path. Observers receive the whole list on subscription and
//! again after every change.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use tracing::debug;

const LEDGER_ROOT: &str = "userMessages";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerPath(String);

impl LedgerPath {
    pub fn for_user(uid: &str) -> Self {
        Self(format!("{LEDGER_ROOT}/{uid}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("{0}")]
    Read(String),
}

pub type FeedEvent = std::result::Result<Vec<String>, FeedError>;

pub type FeedCallback = Arc<dyn Fn(FeedEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Stores `value` as a new entry under `path` and returns its generated key.
    async fn append(&self, path: &LedgerPath, value: String) -> Result<String>;

    /// Registers `callback` for `path`. The current list is delivered before
    /// this returns.
    fn subscribe(&self, path: &LedgerPath, callback: FeedCallback) -> ListenerId;

    /// Returns false when `id` was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// Book-keeping for listeners shared by the ledger implementations.
///
/// Snapshots passed to [`ListenerRegistry::publish`] and
/// [`ListenerRegistry::attach`] are taken and delivered under one delivery
/// lock, so listeners never see an older list after a newer one. Callbacks
/// must not append to the ledger that is notifying them.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: RwLock<HashMap<ListenerId, (LedgerPath, FeedCallback)>>,
    delivery: Mutex<()>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, path: &LedgerPath, callback: FeedCallback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        listeners.insert(id, (path.clone(), callback));
        debug!("Added listener {:?} for path: {}", id, path);
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        let removed = listeners.remove(&id);
        if let Some((path, _)) = &removed {
            debug!("Removed listener {:?} for path: {}", id, path);
        }
        removed.is_some()
    }

    pub fn callbacks_for(&self, path: &LedgerPath) -> Vec<FeedCallback> {
        let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        listeners
            .values()
            .filter(|(p, _)| p == path)
            .map(|(_, cb)| Arc::clone(cb))
            .collect()
    }

    pub fn count_for(&self, path: &LedgerPath) -> usize {
        let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        listeners.values().filter(|(p, _)| p == path).count()
    }

    /// Delivers `event` to every listener on `path`. The listener lock is
    /// released before callbacks run.
    pub fn notify(&self, path: &LedgerPath, event: FeedEvent) {
        let callbacks = self.callbacks_for(path);
        debug!("Notifying {} listener(s) on {}", callbacks.len(), path);
        for callback in callbacks {
            callback(event.clone());
        }
    }

    /// Takes a snapshot of `path` and delivers it to every listener, in
    /// order with every other delivery from this registry.
    pub fn publish<F>(&self, path: &LedgerPath, snapshot: F)
    where
        F: FnOnce() -> FeedEvent,
    {
        let _delivery = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
        self.notify(path, snapshot());
    }

    /// Registers `callback` and hands it its first snapshot before any
    /// later delivery can reach it.
    pub fn attach<F>(&self, path: &LedgerPath, callback: FeedCallback, snapshot: F) -> ListenerId
    where
        F: FnOnce() -> FeedEvent,
    {
        let _delivery = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
        let id = self.register(path, Arc::clone(&callback));
        callback(snapshot());
        id
    }
}
