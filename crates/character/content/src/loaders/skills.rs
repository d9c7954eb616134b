//! Skill tree loader.

use std::path::Path;

use character_core::SkillTreeDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill tree list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTreeCatalog {
    pub trees: Vec<SkillTreeDefinition>,
}

/// Loader for skill trees from RON files.
pub struct SkillTreeLoader;

impl SkillTreeLoader {
    /// Load skill trees from a RON file holding a [`SkillTreeCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<SkillTreeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill trees in {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillTreeDefinition>> {
        let catalog: SkillTreeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill tree RON: {}", e))?;

        Ok(catalog.trees)
    }
}
