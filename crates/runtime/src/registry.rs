//! Versioned catalog registry.
//!
//! The active catalog is an immutable [`CatalogSnapshot`] behind an `Arc`.
//! Readers clone the `Arc` and keep using their snapshot for as long as they
//! need it; a reload builds the replacement without holding the lock and then
//! swaps the pointer. A failed reload leaves the previous snapshot active.
use std::sync::{Arc, PoisonError, RwLock};

use character_content::ContentFactory;
use character_core::{Catalog, ClassDefinition, EngineConfig, SkillTreeDefinition};

use crate::config::{EngineOverrides, RuntimeConfig};
use crate::error::{Result, RuntimeError};

/// One published catalog together with the engine switches it was loaded
/// with.
#[derive(Debug)]
pub struct CatalogSnapshot {
    version: u64,
    catalog: Catalog,
    config: EngineConfig,
}

impl CatalogSnapshot {
    /// Starts at 1 and increases by one with every successful swap.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Holds the active [`CatalogSnapshot`] and replaces it atomically.
#[derive(Debug)]
pub struct CatalogRegistry {
    current: RwLock<Arc<CatalogSnapshot>>,
    source: Option<ContentFactory>,
    overrides: EngineOverrides,
}

impl CatalogRegistry {
    /// Registry over an already built catalog. [`CatalogRegistry::reload`] is
    /// unavailable; use [`CatalogRegistry::replace`].
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot {
                version: 1,
                catalog,
                config,
            })),
            source: None,
            overrides: EngineOverrides::default(),
        }
    }

    /// Loads the initial snapshot from a data directory.
    pub fn from_content(factory: ContentFactory, overrides: EngineOverrides) -> Result<Self> {
        let (catalog, config) = load(&factory, &overrides)?;
        tracing::info!(
            "Loaded catalog v1 from {}: {} classes, {} skills",
            factory.data_dir().display(),
            catalog.class_count(),
            catalog.skill_count()
        );

        Ok(Self {
            current: RwLock::new(Arc::new(CatalogSnapshot {
                version: 1,
                catalog,
                config,
            })),
            source: Some(factory),
            overrides,
        })
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        Self::from_content(ContentFactory::new(&config.data_dir), config.overrides)
    }

    /// The active snapshot.
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn version(&self) -> u64 {
        self.current().version
    }

    /// Re-reads the content source and swaps in the new catalog.
    ///
    /// On any failure the error is logged and returned, and the previous
    /// snapshot stays active.
    pub fn reload(&self) -> Result<Arc<CatalogSnapshot>> {
        let factory = self.source.as_ref().ok_or(RuntimeError::NoContentSource)?;
        match load(factory, &self.overrides) {
            Ok((catalog, config)) => Ok(self.install(catalog, config)),
            Err(err) => {
                tracing::warn!(
                    "Catalog reload rejected, keeping v{}: {}",
                    self.version(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Builds a catalog from in-memory definitions and swaps it in, keeping
    /// the active engine config.
    pub fn replace(
        &self,
        classes: &[ClassDefinition],
        trees: &[SkillTreeDefinition],
    ) -> Result<Arc<CatalogSnapshot>> {
        let config = self.current().config;
        match Catalog::build(classes, trees) {
            Ok(catalog) => Ok(self.install(catalog, config)),
            Err(err) => {
                tracing::warn!(
                    "Catalog replacement rejected, keeping v{}: {}",
                    self.version(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn install(&self, catalog: Catalog, config: EngineConfig) -> Arc<CatalogSnapshot> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(CatalogSnapshot {
            version: current.version + 1,
            catalog,
            config,
        });
        *current = Arc::clone(&next);
        drop(current);

        tracing::info!(
            "Catalog v{} active: {} classes, {} skills",
            next.version,
            next.catalog.class_count(),
            next.catalog.skill_count()
        );
        next
    }
}

fn load(factory: &ContentFactory, overrides: &EngineOverrides) -> Result<(Catalog, EngineConfig)> {
    let config = overrides.apply(factory.load_config()?);
    let classes = factory.load_classes()?;
    let trees = factory.load_trees()?;
    let catalog = Catalog::build(&classes, &trees)?;
    Ok((catalog, config))
}
