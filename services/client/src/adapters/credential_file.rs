//! services/client/src/adapters/credential_file.rs
//!
//! File-backed credential storage, implementing the `CredentialStore` port
//! from the `core` crate. This is the persistent client storage of the
//! session bootstrap contract: read once at process start, written only
//! through the session guard.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use smartchef_core::domain::StoredCredentials;
use smartchef_core::ports::{CredentialStore, PortError, PortResult};

/// An adapter that persists the bearer token and display name as a small
/// JSON file. A missing file reads as signed out.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a new `FileCredentialStore`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsFile {
    token: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> PortResult<Option<StoredCredentials>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        let file: CredentialsFile = serde_json::from_slice(&bytes)
            .map_err(|e| PortError::Unexpected(format!("unreadable credentials file: {}", e)))?;
        Ok(Some(StoredCredentials {
            token: file.token,
            display_name: file.display_name,
        }))
    }

    async fn save(&self, credentials: &StoredCredentials) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        let file = CredentialsFile {
            token: credentials.token.clone(),
            display_name: credentials.display_name.clone(),
        };
        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn clear(&self) -> PortResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }
}
