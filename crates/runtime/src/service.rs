//! Build service: the entry point transport layers call into.
//!
//! Every call takes the active snapshot once and runs entirely against it, so
//! a concurrent reload never mixes two catalogs within one request.
use std::sync::Arc;

use character_core::{
    AttributeAllocation, BuildComparison, BuildRequest, ClassId, ExportDocument, ExportOptions,
    Playstyle, RuleError, ResolvedBuild, SkillId, ValidatedBuild, ValidationError,
    compare_builds, export, optimize_allocation, resolve, suggest_allocation, validate,
};

use crate::error::Result;
use crate::registry::{CatalogRegistry, CatalogSnapshot};

/// Summary of an accepted build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub catalog_version: u64,
    pub class: ClassId,
    pub level: u32,
    pub skills: Vec<SkillId>,
    pub skill_cost: u64,
    pub unspent_attribute_points: u64,
    pub unspent_skill_points: u64,
}

impl BuildReport {
    fn new(version: u64, build: &ValidatedBuild<'_>) -> Self {
        Self {
            catalog_version: version,
            class: build.class().id.clone(),
            level: build.level(),
            skills: build.selection().iter().cloned().collect(),
            skill_cost: build.skill_cost(),
            unspent_attribute_points: build.unspent_attribute_points(),
            unspent_skill_points: build.unspent_skill_points(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BuildService {
    registry: Arc<CatalogRegistry>,
}

impl BuildService {
    pub fn new(registry: Arc<CatalogRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CatalogRegistry> {
        &self.registry
    }

    /// Validates `request` and reports budget usage.
    pub fn check(&self, request: &BuildRequest) -> Result<BuildReport> {
        let snapshot = self.registry.current();
        let build = validate_in(&snapshot, request)?;
        Ok(BuildReport::new(snapshot.version(), &build))
    }

    /// Validates and resolves `request`.
    pub fn resolve(&self, request: &BuildRequest) -> Result<ResolvedBuild> {
        let snapshot = self.registry.current();
        let build = validate_in(&snapshot, request)?;
        Ok(resolve(&build))
    }

    /// Validates, resolves and exports `request` with the configured options.
    pub fn export(&self, request: &BuildRequest) -> Result<ExportDocument> {
        let snapshot = self.registry.current();
        let options = snapshot.config().export_options();
        self.export_in(&snapshot, request, &options)
    }

    /// Same as [`BuildService::export`] with explicit options.
    pub fn export_with(
        &self,
        request: &BuildRequest,
        options: &ExportOptions,
    ) -> Result<ExportDocument> {
        let snapshot = self.registry.current();
        self.export_in(&snapshot, request, options)
    }

    /// Resolves both builds against the same snapshot and compares them.
    pub fn compare(&self, first: &BuildRequest, second: &BuildRequest) -> Result<BuildComparison> {
        let snapshot = self.registry.current();
        let first = resolve(&validate_in(&snapshot, first)?);
        let second = resolve(&validate_in(&snapshot, second)?);
        let comparison = compare_builds(&first, &second);

        tracing::debug!(
            "Compared {} vs {}: winner {}",
            first.class().id,
            second.class().id,
            comparison.winner
        );
        Ok(comparison)
    }

    /// Allocation for `class` split by its power weights.
    pub fn suggest(&self, class: &str, playstyle: Playstyle) -> Result<AttributeAllocation> {
        let snapshot = self.registry.current();
        let definition = snapshot
            .catalog()
            .class(class)
            .ok_or_else(|| ValidationError::UnknownClass {
                class: ClassId::from(class),
            })?;
        Ok(suggest_allocation(definition, playstyle))
    }

    /// Validates `request` and nudges its allocation toward the balanced
    /// suggestion for its class.
    pub fn optimize(&self, request: &BuildRequest) -> Result<AttributeAllocation> {
        let snapshot = self.registry.current();
        let build = validate_in(&snapshot, request)?;
        let optimized = optimize_allocation(build.class(), build.allocation());
        tracing::debug!(
            "Optimized {} allocation: {:?} -> {:?}",
            request.class,
            build.allocation().as_set(),
            optimized.as_set()
        );
        Ok(optimized)
    }

    fn export_in(
        &self,
        snapshot: &CatalogSnapshot,
        request: &BuildRequest,
        options: &ExportOptions,
    ) -> Result<ExportDocument> {
        let build = validate_in(snapshot, request)?;
        let document = export(&resolve(&build), options);
        tracing::debug!(
            "Exported {} build with schema {}",
            request.class,
            options.schema_version
        );
        Ok(document)
    }
}

fn validate_in<'s>(
    snapshot: &'s CatalogSnapshot,
    request: &BuildRequest,
) -> Result<ValidatedBuild<'s>> {
    let options = snapshot.config().validation_options();
    match validate(snapshot.catalog(), request, &options) {
        Ok(build) => {
            tracing::debug!(
                "Accepted {} build on catalog v{} ({} skills)",
                request.class,
                snapshot.version(),
                build.selection().len()
            );
            Ok(build)
        }
        Err(err) => {
            tracing::debug!(
                "Rejected {} build on catalog v{}: {} ({})",
                request.class,
                snapshot.version(),
                err,
                err.error_code()
            );
            Err(err.into())
        }
    }
}
