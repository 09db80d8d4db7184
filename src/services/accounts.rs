use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::token::random_account_id;
use crate::models::{Account, Session};
use crate::services::snapshot::{append_account, load_accounts};
use crate::services::store::{RecordStore, StoreError};

/// Errors that can occur during registration or login
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Username must not be empty")]
    UsernameRequired,

    #[error("Username is already taken: {0}")]
    UsernameTaken(String),

    #[error("Username doesn't exist: {0}")]
    UnknownUser(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    HashError(#[from] bcrypt::BcryptError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Password task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Registration and login over the accounts table
///
/// Usernames are trimmed and compare case-insensitively. Lookups scan every
/// stored account. Hashing runs on the blocking pool.
pub struct AccountService {
    store: Arc<dyn RecordStore>,
    bcrypt_cost: u32,
    // Keeps the uniqueness check and the append together within this process
    registration: Mutex<()>,
}

impl AccountService {
    pub fn new(store: Arc<dyn RecordStore>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            bcrypt_cost,
            registration: Mutex::new(()),
        }
    }

    /// Create an account and return its session
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::UsernameRequired);
        }

        let _guard = self.registration.lock().await;

        if self.find_by_username(username).await?.is_some() {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        let account = Account {
            owner_id: Uuid::new_v4(),
            account_id: random_account_id(),
            username: username.to_string(),
            password_hash,
            created_at_ms: chrono::Utc::now().timestamp_millis(),
        };

        append_account(self.store.as_ref(), &account).await?;

        tracing::info!("Registered account {} for {}", account.account_id, account.username);
        Ok(account.session())
    }

    /// Check credentials and return the account's session
    ///
    /// Surrounding whitespace in the username is ignored, as on registration.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AccountError> {
        let username = username.trim();

        let account = self
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::UnknownUser(username.to_string()))?;

        let password = password.to_string();
        let hash = account.password_hash.clone();
        if !tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?? {
            tracing::info!("Rejected login for {}", account.username);
            return Err(AccountError::InvalidCredentials);
        }

        tracing::debug!("Login accepted for {}", account.username);
        Ok(account.session())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        let snapshot = load_accounts(self.store.as_ref()).await?;

        if !snapshot.skipped.is_empty() {
            tracing::warn!("Ignored {} malformed account records", snapshot.skipped.len());
        }

        let wanted = username.to_lowercase();
        Ok(snapshot
            .records
            .into_iter()
            .find(|account| account.username.to_lowercase() == wanted))
    }
}
