//! Storage provider configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use. Only `"local"` is available.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// URL prefix under which stored bytes are served.
    #[serde(default = "default_public_url_prefix")]
    pub public_url_prefix: String,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            public_url_prefix: default_public_url_prefix(),
            local: LocalStorageConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Public URL for a stored key.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_url_prefix.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_public_url_prefix() -> String {
    "/storage".to_string()
}

fn default_local_root() -> String {
    "./data/storage".to_string()
}
