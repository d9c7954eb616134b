//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use character_core::{BuildRequest, Catalog, ClassDefinition, EngineConfig, SkillTreeDefinition};

use crate::loaders::{BuildLoader, ClassLoader, ConfigLoader, LoadResult, SkillTreeLoader};

/// Content factory that loads all character content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── classes.ron
/// ├── skills.ron
/// └── builds/
///     ├── warrior.ron
///     └── mage.json
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(EngineConfig::default())
        }
    }

    /// Load class definitions from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassDefinition>> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load skill trees from `skills.ron`.
    pub fn load_trees(&self) -> LoadResult<Vec<SkillTreeDefinition>> {
        SkillTreeLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load every definition and build the catalog.
    ///
    /// Definition errors are wrapped with the data directory for context; the
    /// typed [`character_core::DefinitionError`] stays reachable through
    /// `downcast_ref`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let classes = self.load_classes()?;
        let trees = self.load_trees()?;
        let catalog = Catalog::build(&classes, &trees).map_err(|e| {
            anyhow::Error::new(e).context(format!(
                "Invalid definitions in {}",
                self.data_dir.display()
            ))
        })?;

        Ok(catalog)
    }

    /// Load a build request. Relative paths are resolved against the data
    /// directory first, then the working directory.
    pub fn load_build(&self, path: &Path) -> LoadResult<BuildRequest> {
        let in_data_dir = self.data_dir.join(path);
        if path.is_relative() && in_data_dir.exists() {
            BuildLoader::load(&in_data_dir)
        } else {
            BuildLoader::load(path)
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
