//! Application bootstrap.
//!
//! `Dashboard` wires the credential store, settings and view-model together.
//! Every frontend constructs one at startup and calls [`Dashboard::bootstrap`].

use std::sync::Arc;

use cfdash_client::{ClientConfig, Credentials};

use crate::error::CoreResult;
use crate::services::{DomainViewModel, SettingsService, normalize_credentials};
use crate::traits::CredentialStore;

/// Platform-agnostic application state.
pub struct Dashboard {
    /// Settings screen service
    pub settings: SettingsService,
    /// Zone and record screens
    pub view_model: Arc<DomainViewModel>,
}

impl Dashboard {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, config: ClientConfig) -> Self {
        Self {
            settings: SettingsService::new(store, config),
            view_model: Arc::new(DomainViewModel::new()),
        }
    }

    /// Read the stored credentials once and hand a client to the view-model.
    ///
    /// Returns the loaded credentials. Empty credentials are not an error; the
    /// view-model then reports `MissingCredentials` until they are saved.
    pub async fn bootstrap(&self) -> CoreResult<Credentials> {
        let credentials = self.settings.load_credentials().await?;

        if !credentials.is_complete() {
            log::info!("No Cloudflare credentials stored yet");
            return Ok(credentials);
        }

        let client = self.settings.build_client(credentials.clone())?;
        self.view_model.set_api(Arc::new(client)).await;
        log::info!("Dashboard ready for {}", credentials.email);
        Ok(credentials)
    }

    /// Persist new credentials and start over with a client using them.
    ///
    /// Nothing is written unless a client can be built from them. Zones and
    /// records loaded with the previous account are dropped.
    pub async fn save_credentials(&self, credentials: &Credentials) -> CoreResult<Credentials> {
        let credentials = normalize_credentials(credentials)?;
        let client = self.settings.build_client(credentials.clone())?;
        let saved = self.settings.save_credentials(&credentials).await?;

        self.view_model.set_api(Arc::new(client)).await;
        self.view_model.reset();
        Ok(saved)
    }
}
