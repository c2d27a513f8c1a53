//! JSON preference file credential store
//!
//! Keeps the email and API key as two string entries (`email`, `apiKey`) of
//! a flat JSON object. Other entries in the file are left alone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cfdash_client::Credentials;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialStore;

const STORE_DIR_NAME: &str = "cfdash";
const STORE_FILE_NAME: &str = "preferences.json";
const EMAIL_KEY: &str = "email";
const API_KEY_KEY: &str = "apiKey";
const MAX_STORE_FILE_SIZE: u64 = 1024 * 1024; // 1MB

/// Credential store backed by a JSON preference file.
pub struct JsonFileCredentialStore {
    path: PathBuf,
}

impl JsonFileCredentialStore {
    /// Store at an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location:
    /// - Linux: `~/.config/cfdash/preferences.json`
    /// - macOS: `~/Library/Application Support/cfdash/preferences.json`
    /// - Windows: `%APPDATA%\cfdash\preferences.json`
    pub fn default_location() -> CoreResult<Self> {
        let dir = dirs::config_dir().ok_or_else(|| {
            CoreError::Storage("Failed to determine config directory".to_string())
        })?;
        Ok(Self::new(dir.join(STORE_DIR_NAME).join(STORE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole preference object. A missing file is an empty object.
    async fn read_document(&self) -> CoreResult<Map<String, Value>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Preference file does not exist: {}", self.path.display());
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "Failed to read preference file metadata: {e}"
                )));
            }
        };

        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(CoreError::Storage(format!(
                "Preference file too large: {} bytes (max: {} bytes)",
                metadata.len(),
                MAX_STORE_FILE_SIZE
            )));
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to read preference file: {e}")))?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(CoreError::Serialization(
                "Invalid preference format: expected a JSON object".to_string(),
            )),
            Err(e) => Err(CoreError::Serialization(format!(
                "Invalid preference format: {e}"
            ))),
        }
    }

    /// Write through a temporary file so a crash never leaves half a document.
    async fn write_document(&self, document: &Map<String, Value>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::Storage(format!("Failed to create preference directory: {e}"))
            })?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to write preference file: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| {
                    CoreError::Storage(format!("Failed to restrict preference file: {e}"))
                })?;
        }

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to replace preference file: {e}")))
    }
}

fn string_entry(document: &Map<String, Value>, key: &str) -> String {
    document
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl CredentialStore for JsonFileCredentialStore {
    async fn load(&self) -> CoreResult<Credentials> {
        let document = self.read_document().await?;
        Ok(Credentials::new(
            string_entry(&document, EMAIL_KEY),
            string_entry(&document, API_KEY_KEY),
        ))
    }

    async fn save(&self, credentials: &Credentials) -> CoreResult<()> {
        let mut document = self.read_document().await?;
        document.insert(
            EMAIL_KEY.to_string(),
            Value::String(credentials.email.clone()),
        );
        document.insert(
            API_KEY_KEY.to_string(),
            Value::String(credentials.api_key.clone()),
        );
        self.write_document(&document).await?;

        log::info!("Credentials saved to {}", self.path.display());
        Ok(())
    }
}
