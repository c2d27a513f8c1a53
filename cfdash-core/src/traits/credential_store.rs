//! 凭证存储抽象 Trait

use async_trait::async_trait;
use cfdash_client::Credentials;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// 凭证存储 Trait
///
/// Holds the single email / API key pair of the dashboard.
///
/// 实现:
/// - `JsonFileCredentialStore`: JSON preference file on disk
/// - `InMemoryCredentialStore`: tests and ephemeral sessions
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored credentials.
    ///
    /// Nothing stored yet yields empty credentials, not an error.
    async fn load(&self) -> CoreResult<Credentials>;

    /// Persist the credentials, replacing the previous pair.
    async fn save(&self, credentials: &Credentials) -> CoreResult<()>;
}

/// In-memory credential store
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<Credentials>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `credentials`.
    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> CoreResult<Credentials> {
        Ok(self.credentials.read().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> CoreResult<()> {
        *self.credentials.write().await = credentials.clone();
        Ok(())
    }
}
