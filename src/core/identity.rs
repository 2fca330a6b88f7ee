//! Identity provider abstractions

use crate::core::input::InputError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Shortest password an account may be created with.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Handle returned once a user is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("This email is already in use")]
    AccountCollision,

    #[error("Password too weak (6 characters minimum)")]
    WeakCredential,

    #[error("Not signed in, run `moneyconv sign-in` first")]
    NotSignedIn,

    #[error("Error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Rejects blank fields before they reach a provider.
    pub fn new(email: &str, password: &str) -> Result<Self, InputError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(InputError::BlankCredentials);
        }
        Ok(Self {
            email: normalize_email(email),
            password: password.to_string(),
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Stored form of an account in the local providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub uid: String,
    pub email: String,
    pub salt: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn create(credentials: &Credentials) -> Result<Self, AuthError> {
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakCredential);
        }
        let salt = uuid::Uuid::new_v4().simple().to_string();
        Ok(Self {
            uid: uuid::Uuid::new_v4().simple().to_string(),
            email: credentials.email.clone(),
            password_hash: hash_password(&salt, &credentials.password),
            salt,
            created_at: Utc::now(),
        })
    }

    pub fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }

    pub fn user(&self) -> AuthUser {
        AuthUser {
            uid: self.uid.clone(),
            email: self.email.clone(),
        }
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
}
