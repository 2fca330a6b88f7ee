use crate::core::identity::{
    AccountRecord, AuthError, AuthUser, Credentials, IdentityProvider, normalize_email,
};
use crate::core::input::InputError;
use crate::core::ledger::{
    FeedCallback, FeedError, FeedEvent, LedgerClient, LedgerPath, ListenerId, ListenerRegistry,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionHandle, PersistMode};
use tracing::{debug, info};
use uuid::Uuid;

impl From<fjall::Error> for AuthError {
    fn from(e: fjall::Error) -> Self {
        AuthError::Other(e.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Other(e.to_string())
    }
}

/// Ledger stored in a fjall partition. Entry keys are `{path}/{uuid v7}`,
/// so a prefix scan returns a ledger in insertion order.
pub struct DiskLedger {
    keyspace: Keyspace,
    partition: PartitionHandle,
    listeners: ListenerRegistry,
}

impl DiskLedger {
    pub fn new(keyspace: Keyspace, partition: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
            listeners: ListenerRegistry::new(),
        }
    }

    fn prefix(path: &LedgerPath) -> String {
        format!("{}/", path.as_str())
    }

    pub fn read(&self, path: &LedgerPath) -> FeedEvent {
        let res: Result<Vec<String>> = (|| {
            let mut values = Vec::new();
            for item in self.partition.prefix(Self::prefix(path)) {
                let (_, value) = item?;
                values.push(String::from_utf8(value.to_vec())?);
            }
            Ok(values)
        })();

        res.map_err(|e| {
            debug!("DiskLedger read error for {}: {}", path, e);
            FeedError::Read(e.to_string())
        })
    }
}

#[async_trait]
impl LedgerClient for DiskLedger {
    async fn append(&self, path: &LedgerPath, value: String) -> Result<String> {
        let key = Uuid::now_v7().to_string();
        let storage_key = format!("{}{}", Self::prefix(path), key);
        self.partition
            .insert(storage_key.as_str(), value.as_bytes())
            .with_context(|| format!("Failed to append to {path}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist ledger")?;
        debug!("Appended entry {} to {}", key, path);
        self.listeners.publish(path, || self.read(path));
        Ok(key)
    }

    fn subscribe(&self, path: &LedgerPath, callback: FeedCallback) -> ListenerId {
        self.listeners.attach(path, callback, || self.read(path))
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// Accounts stored in a fjall partition keyed by normalized email.
pub struct DiskIdentity {
    keyspace: Keyspace,
    partition: PartitionHandle,
    resets: PartitionHandle,
}

impl DiskIdentity {
    pub fn new(keyspace: Keyspace, partition: PartitionHandle, resets: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
            resets,
        }
    }

    fn find(&self, email: &str) -> Result<Option<AccountRecord>, AuthError> {
        match self.partition.get(email)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for DiskIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        match self.find(&credentials.email)? {
            Some(record) if record.verify(&credentials.password) => {
                debug!("Signed in {}", record.email);
                Ok(record.user())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        if self.find(&credentials.email)?.is_some() {
            return Err(AuthError::AccountCollision);
        }
        let record = AccountRecord::create(credentials)?;
        self.partition
            .insert(record.email.as_str(), serde_json::to_vec(&record)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        info!("Created account for {}", record.email);
        Ok(record.user())
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(InputError::BlankEmail.into());
        }
        let email = normalize_email(email);
        if self.find(&email)?.is_none() {
            return Err(AuthError::Other(format!("No account found for {email}")));
        }
        let requested_at = chrono::Utc::now().to_rfc3339();
        self.resets.insert(email.as_str(), requested_at.as_bytes())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        info!("Password reset requested for {}", email);
        Ok(())
    }
}
