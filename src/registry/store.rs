//! Registry persistence backends

use crate::registry::LocalRegistry;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for registry storage backends
#[async_trait]
pub trait RegistryBackend: Send + Sync {
    /// Load the registry; a backend with no saved state yields an empty one
    async fn load(&self) -> Result<LocalRegistry>;

    /// Persist the registry
    async fn save(&self, registry: &LocalRegistry) -> Result<()>;
}

/// File-backed store using the registry's JSON table format
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at an explicit path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the platform default location
    pub fn with_default_path() -> Self {
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(data_dir.join("trellis").join("registry.json"))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RegistryBackend for JsonFileStore {
    async fn load(&self) -> Result<LocalRegistry> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no registry file, starting empty");
            return Ok(LocalRegistry::new());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read registry at {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(LocalRegistry::new());
        }

        LocalRegistry::from_json(&content)
            .with_context(|| format!("failed to parse registry at {}", self.path.display()))
    }

    async fn save(&self, registry: &LocalRegistry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = registry.to_json_pretty()?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("failed to write registry at {}", self.path.display()))?;
        debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }
}

/// In-memory store (for testing or ephemeral use)
pub struct InMemoryStore {
    registry: tokio::sync::RwLock<LocalRegistry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            registry: tokio::sync::RwLock::new(LocalRegistry::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryBackend for InMemoryStore {
    async fn load(&self) -> Result<LocalRegistry> {
        Ok(self.registry.read().await.clone())
    }

    async fn save(&self, registry: &LocalRegistry) -> Result<()> {
        *self.registry.write().await = registry.clone();
        Ok(())
    }
}
