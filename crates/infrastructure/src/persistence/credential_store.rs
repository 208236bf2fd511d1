//! File-backed credential store
//!
//! Persists the deployment's single credential set as a JSON file in the
//! camelCase wire form. Saves are atomic from a reader's perspective: the
//! new set is written to a sibling temp file, synced, then renamed over the
//! old one, so a concurrent load observes either the previous or the new
//! set in full.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use application::{error::GatewayError, ports::CredentialStorePort};
use async_trait::async_trait;
use domain::CredentialSet;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

/// JSON-file credential store
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store persisting to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path the credential set is persisted at
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<CredentialSet>, GatewayError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No credential file present");
                return Ok(None);
            },
            Err(e) => {
                return Err(GatewayError::Internal(format!(
                    "Failed to read credential file: {e}"
                )));
            },
        };

        match serde_json::from_slice::<CredentialSet>(&bytes) {
            Ok(set) => Ok(Some(set)),
            Err(e) => {
                // A corrupt record is a destroyed credential: force the
                // re-authorization flow instead of failing every request.
                warn!(error = %e, "Credential file is corrupt, treating as absent");
                Ok(None)
            },
        }
    }

    #[instrument(skip(self, credentials), fields(path = %self.path.display()))]
    async fn save(&self, credentials: &CredentialSet) -> Result<(), GatewayError> {
        let bytes = serde_json::to_vec_pretty(credentials)
            .map_err(|e| GatewayError::Internal(format!("Failed to serialize credentials: {e}")))?;

        let temp_path = self.temp_path();
        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| GatewayError::Internal(format!("Failed to create temp file: {e}")))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| GatewayError::Internal(format!("Failed to write credentials: {e}")))?;
        file.sync_all()
            .await
            .map_err(|e| GatewayError::Internal(format!("Failed to sync credentials: {e}")))?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| GatewayError::Internal(format!("Failed to replace credential file: {e}")))?;

        debug!("Credential set persisted");
        Ok(())
    }
}
