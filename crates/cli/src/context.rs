//! Shared setup for commands: configuration, content and the build service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use character_content::ContentFactory;
use character_core::BuildRequest;
use runtime::{BuildService, CatalogRegistry, RuntimeConfig, RuntimeError};

pub struct Context {
    config: RuntimeConfig,
}

impl Context {
    /// `data_dir` from the command line wins over `CHARFORGE_DATA_DIR`.
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        let mut config = RuntimeConfig::from_env();
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        tracing::debug!(
            "Using data directory {} ({:?})",
            config.data_dir.display(),
            config.overrides
        );
        Self { config }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn factory(&self) -> ContentFactory {
        ContentFactory::new(&self.config.data_dir)
    }

    pub fn service(&self) -> Result<BuildService> {
        let registry = CatalogRegistry::from_config(&self.config).map_err(describe)?;
        Ok(BuildService::new(Arc::new(registry)))
    }

    pub fn load_build(&self, path: &Path) -> Result<BuildRequest> {
        self.factory()
            .load_build(path)
            .with_context(|| format!("Failed to load build {}", path.display()))
    }
}

/// Converts a runtime error into an `anyhow` error that keeps the stable
/// code in its message.
pub fn describe(err: RuntimeError) -> anyhow::Error {
    match err.error_code() {
        Some(code) => anyhow::anyhow!("[{}] {}", code, err),
        None => anyhow::Error::new(err),
    }
}
