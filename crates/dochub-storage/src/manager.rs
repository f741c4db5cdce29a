//! Storage manager: owns the configured provider and the public URL scheme.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use dochub_core::config::storage::StorageConfig;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::traits::storage::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Front door for stored bytes.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl StorageManager {
    /// Build the provider named by `config.provider`.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
            "local" => Arc::new(LocalStorageProvider::new(&config.local.root_path).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Expected 'local'"
                )));
            }
        };

        info!(
            provider = provider.provider_type(),
            root = %config.local.root_path,
            "Storage initialized"
        );
        Ok(Self::new(provider, config.clone()))
    }

    /// Wrap an existing provider.
    pub fn new(provider: Arc<dyn StorageProvider>, config: StorageConfig) -> Self {
        Self { provider, config }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Directory served under the public URL prefix, for local storage.
    pub fn local_root(&self) -> Option<PathBuf> {
        (self.provider.provider_type() == "local")
            .then(|| PathBuf::from(&self.config.local.root_path))
    }

    /// URL prefix for stored objects, e.g. `/storage`.
    pub fn public_url_prefix(&self) -> &str {
        &self.config.public_url_prefix
    }

    /// Public URL for a key.
    pub fn public_url(&self, key: &str) -> String {
        self.config.public_url(key)
    }

    /// Store bytes under `key`.
    pub async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.provider.write(key, data).await
    }

    /// Read the bytes stored under `key`.
    pub async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.provider.read_bytes(key).await
    }

    /// Whether `key` exists.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        self.provider.exists(key).await
    }

    /// Delete `key`, propagating failures.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.provider.delete(key).await
    }

    /// Delete every key, logging failures instead of returning them.
    /// Returns how many deletions failed.
    pub async fn delete_quietly<I, S>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut failed = 0;
        for key in keys {
            let key = key.as_ref();
            if let Err(e) = self.provider.delete(key).await {
                warn!(key, error = %e, "Failed to delete stored object");
                failed += 1;
            }
        }
        failed
    }

    /// Check provider health.
    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }
}
