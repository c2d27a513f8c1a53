//! 设置服务：凭证的读取、保存与客户端构建

use std::sync::Arc;

use cfdash_client::{ClientConfig, CloudflareClient, Credentials};

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialStore;

/// Backs the settings screen.
pub struct SettingsService {
    store: Arc<dyn CredentialStore>,
    config: ClientConfig,
}

impl SettingsService {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, config: ClientConfig) -> Self {
        Self { store, config }
    }

    /// 读取已保存的凭证（可能为空）
    pub async fn load_credentials(&self) -> CoreResult<Credentials> {
        self.store.load().await
    }

    /// 保存凭证
    ///
    /// The credentials go through [`normalize_credentials`] first.
    pub async fn save_credentials(&self, credentials: &Credentials) -> CoreResult<Credentials> {
        let credentials = normalize_credentials(credentials)?;

        self.store.save(&credentials).await?;
        log::info!("Saved credentials for {}", credentials.email);
        Ok(credentials)
    }

    /// 根据凭证构建 Cloudflare 客户端
    pub fn build_client(&self, credentials: Credentials) -> CoreResult<CloudflareClient> {
        if !credentials.is_complete() {
            return Err(CoreError::MissingCredentials);
        }
        Ok(CloudflareClient::new(self.config.clone(), credentials)?)
    }
}

/// Trim surrounding whitespace; reject either field left empty.
pub fn normalize_credentials(credentials: &Credentials) -> CoreResult<Credentials> {
    let credentials = Credentials::new(credentials.email.trim(), credentials.api_key.trim());
    if credentials.email.is_empty() {
        return Err(CoreError::Validation("email: must not be empty".to_string()));
    }
    if credentials.api_key.is_empty() {
        return Err(CoreError::Validation(
            "api_key: must not be empty".to_string(),
        ));
    }
    Ok(credentials)
}
