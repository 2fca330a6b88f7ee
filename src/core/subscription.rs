//! A view's subscription to a ledger feed.
//!
//! Each [`LedgerSubscription`] owns at most one listener on its ledger. The
//! latest aggregate is published through a `tokio::sync::watch` channel so
//! callers can either read it directly or await the next change.

use crate::core::aggregate::{self, LedgerTotals};
use crate::core::ledger::{FeedCallback, FeedEvent, LedgerClient, LedgerPath, ListenerId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub totals: LedgerTotals,
    pub error: Option<String>,
    /// Set once the feed has delivered at least once.
    pub loaded: bool,
}

impl LedgerState {
    fn from_event(event: &FeedEvent) -> Self {
        match event {
            Ok(values) => {
                let totals = aggregate::aggregate(values.as_slice());
                debug!("Data received: {} amounts", totals.count);
                Self {
                    totals,
                    error: None,
                    loaded: true,
                }
            }
            Err(e) => {
                error!("Database read failed: {}", e);
                Self {
                    totals: LedgerTotals::default(),
                    error: Some(format!("Database read failed: {e}")),
                    loaded: true,
                }
            }
        }
    }
}

pub struct LedgerSubscription {
    client: Arc<dyn LedgerClient>,
    path: LedgerPath,
    listener: Option<ListenerId>,
    state: Arc<watch::Sender<LedgerState>>,
}

impl LedgerSubscription {
    pub fn new(client: Arc<dyn LedgerClient>, path: LedgerPath) -> Self {
        let (state, _) = watch::channel(LedgerState::default());
        Self {
            client,
            path,
            listener: None,
            state: Arc::new(state),
        }
    }

    pub fn path(&self) -> &LedgerPath {
        &self.path
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Subscribes to the feed. Calling this while already active is a no-op.
    pub fn start(&mut self) {
        if self.listener.is_some() {
            debug!("Subscription for {} already active", self.path);
            return;
        }
        let state = Arc::clone(&self.state);
        let callback: FeedCallback = Arc::new(move |event: FeedEvent| {
            state.send_replace(LedgerState::from_event(&event));
        });
        debug!("Adding listener for path: {}", self.path);
        self.listener = Some(self.client.subscribe(&self.path, callback));
    }

    /// Releases the listener. The last observed state is kept.
    pub fn stop(&mut self) {
        if let Some(id) = self.listener.take() {
            debug!("Removing listener for path: {}", self.path);
            self.client.unsubscribe(id);
        }
    }

    pub fn state(&self) -> LedgerState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<LedgerState> {
        self.state.subscribe()
    }
}

impl Drop for LedgerSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}
