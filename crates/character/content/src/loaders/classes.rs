//! Class definition loader.

use std::path::Path;

use character_core::ClassDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Class list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Loader for class definitions from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load class definitions from a RON file holding a [`ClassCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse classes in {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ClassDefinition>> {
        let catalog: ClassCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class catalog RON: {}", e))?;

        Ok(catalog.classes)
    }
}
