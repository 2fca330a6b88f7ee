use crate::core::identity::{
    AccountRecord, AuthError, AuthUser, Credentials, IdentityProvider, normalize_email,
};
use crate::core::input::InputError;
use crate::core::ledger::{
    FeedCallback, FeedError, LedgerClient, LedgerPath, ListenerId, ListenerRegistry,
};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// In-memory ledger. Entries keep insertion order.
#[derive(Default)]
pub struct MemoryLedger {
    entries: RwLock<HashMap<LedgerPath, Vec<(String, String)>>>,
    listeners: ListenerRegistry,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, path: &LedgerPath) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(path)
            .map(|list| list.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default()
    }

    pub fn listener_count(&self, path: &LedgerPath) -> usize {
        self.listeners.count_for(path)
    }

    /// Delivers a feed error to every listener on `path`.
    pub fn fail(&self, path: &LedgerPath, error: FeedError) {
        debug!("Failing feed for {}: {}", path, error);
        self.listeners.publish(path, || Err(error));
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn append(&self, path: &LedgerPath, value: String) -> Result<String> {
        let key = Uuid::now_v7().to_string();
        {
            let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
            entries
                .entry(path.clone())
                .or_default()
                .push((key.clone(), value));
        }
        debug!("Appended entry {} to {}", key, path);
        self.listeners.publish(path, || Ok(self.values(path)));
        Ok(key)
    }

    fn subscribe(&self, path: &LedgerPath, callback: FeedCallback) -> ListenerId {
        self.listeners
            .attach(path, callback, || Ok(self.values(path)))
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// In-memory accounts keyed by normalized email.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: Mutex<HashMap<String, AccountRecord>>,
    reset_requests: Mutex<Vec<String>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().await.clone()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        let accounts = self.accounts.lock().await;
        match accounts.get(&credentials.email) {
            Some(record) if record.verify(&credentials.password) => Ok(record.user()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&credentials.email) {
            return Err(AuthError::AccountCollision);
        }
        let record = AccountRecord::create(credentials)?;
        let user = record.user();
        accounts.insert(record.email.clone(), record);
        info!("Created account for {}", user.email);
        Ok(user)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(InputError::BlankEmail.into());
        }
        let email = normalize_email(email);
        if !self.accounts.lock().await.contains_key(&email) {
            return Err(AuthError::Other(format!("No account found for {email}")));
        }
        info!("Password reset requested for {}", email);
        self.reset_requests.lock().await.push(email);
        Ok(())
    }
}
