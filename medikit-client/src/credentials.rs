//! Credential storage - the single persisted value on the client.
//!
//! The bearer token is written once at login and cleared at logout;
//! nothing else survives a process restart. On device this trait is backed
//! by the platform keychain; the crate ships an in-memory implementation
//! for server-side use and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Error talking to the credential backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialError {
    /// The backing store could not be reached
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Scoped secure storage for the bearer token.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored token, if any.
    async fn load(&self) -> Result<Option<String>, CredentialError>;

    /// Replace the stored token.
    async fn store(&self, token: &str) -> Result<(), CredentialError>;

    /// Remove the stored token.
    async fn clear(&self) -> Result<(), CredentialError>;
}

/// Process-local credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.token.read().await.clone())
    }

    async fn store(&self, token: &str) -> Result<(), CredentialError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        *self.token.write().await = None;
        Ok(())
    }
}
