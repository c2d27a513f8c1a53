//! Cloudflare v4 API client

mod api;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::Credentials;

/// Cloudflare API client authenticated with an email + global API key.
///
/// The credentials are captured at construction. After the user edits them,
/// build a new client rather than mutating this one.
pub struct CloudflareClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
    pub(crate) credentials: Credentials,
}

impl CloudflareClient {
    /// Build a client with its own connection pool.
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| ClientError::InvalidConfig {
            detail: format!("base URL '{}': {e}", config.base_url),
        })?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::InvalidConfig {
            detail: format!("HTTP client: {e}"),
        })?;

        log::debug!(
            "Cloudflare client for {} at {}",
            credentials.email,
            config.base_url
        );

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    /// Build a client against the public Cloudflare endpoint.
    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        Self::new(ClientConfig::default(), credentials)
    }

    pub fn email(&self) -> &str {
        &self.credentials.email
    }
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("base_url", &self.config.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
