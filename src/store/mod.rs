pub mod disk;
pub mod memory;

use crate::core::identity::AuthUser;
use anyhow::{Context, Result};
use disk::{DiskIdentity, DiskLedger};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const LEDGER_PARTITION: &str = "ledger";
const ACCOUNTS_PARTITION: &str = "accounts";
const RESETS_PARTITION: &str = "password_resets";
const SESSION_PARTITION: &str = "session";

/// Local fjall keyspace holding the ledger, accounts and the current session.
pub struct Store {
    keyspace: Keyspace,
}

impl Store {
    pub fn open(data_path: &Path) -> Result<Self> {
        let store_path = data_path.join("store");
        std::fs::create_dir_all(&store_path)
            .with_context(|| format!("Failed to create directory: {}", store_path.display()))?;
        let keyspace = fjall::Config::new(&store_path)
            .open()
            .with_context(|| format!("Failed to open store at {}", store_path.display()))?;
        debug!("Opened store at {}", store_path.display());
        Ok(Self { keyspace })
    }

    fn partition(&self, name: &str) -> Result<PartitionHandle> {
        self.keyspace
            .open_partition(name, PartitionCreateOptions::default())
            .with_context(|| format!("Failed to open partition '{name}'"))
    }

    pub fn ledger(&self) -> Result<DiskLedger> {
        Ok(DiskLedger::new(
            self.keyspace.clone(),
            self.partition(LEDGER_PARTITION)?,
        ))
    }

    pub fn identity(&self) -> Result<DiskIdentity> {
        Ok(DiskIdentity::new(
            self.keyspace.clone(),
            self.partition(ACCOUNTS_PARTITION)?,
            self.partition(RESETS_PARTITION)?,
        ))
    }

    pub fn session(&self) -> Result<SessionStore> {
        Ok(SessionStore {
            keyspace: self.keyspace.clone(),
            partition: self.partition(SESSION_PARTITION)?,
        })
    }
}

const CURRENT_SESSION_KEY: &str = "current";

/// The signed-in user, kept between CLI invocations.
pub struct SessionStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl SessionStore {
    pub fn current(&self) -> Result<Option<AuthUser>> {
        match self.partition.get(CURRENT_SESSION_KEY)? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).context("Corrupt session record")?,
            )),
            None => Ok(None),
        }
    }

    pub fn set(&self, user: &AuthUser) -> Result<()> {
        self.partition
            .insert(CURRENT_SESSION_KEY, serde_json::to_vec(user)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Session set for {}", user.email);
        Ok(())
    }

    /// Returns false when nobody was signed in.
    pub fn clear(&self) -> Result<bool> {
        let existed = self.current()?.is_some();
        self.partition.remove(CURRENT_SESSION_KEY)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Session cleared");
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_session_set_and_clear() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let session = store.session().unwrap();
        assert!(session.current().unwrap().is_none());

        let user = AuthUser {
            uid: "u1".to_string(),
            email: "alice@example.com".to_string(),
        };
        session.set(&user).unwrap();
        assert_eq!(session.current().unwrap(), Some(user));

        assert!(session.clear().unwrap());
        assert!(!session.clear().unwrap());
        assert!(session.current().unwrap().is_none());
    }

    #[test]
    fn test_store_reopens_with_data() {
        let dir = tempdir().unwrap();
        let user = AuthUser {
            uid: "u1".to_string(),
            email: "alice@example.com".to_string(),
        };
        {
            let store = Store::open(dir.path()).unwrap();
            store.session().unwrap().set(&user).unwrap();
        }
        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.session().unwrap().current().unwrap(), Some(user));
    }
}
