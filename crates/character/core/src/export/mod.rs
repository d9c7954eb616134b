//! Export Serializer: projects a resolved build into the engine-facing JSON
//! document.
//!
//! Output is byte-stable: field order follows struct declaration order, map
//! keys are sorted, and stat values are rounded half-up exactly once, here.

use std::collections::BTreeMap;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::definition::{AttributeSet, ClassId, SkillId, StatId};
use crate::stats::ResolvedBuild;
use crate::validate::Appearance;

/// Export document layout version.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum SchemaVersion {
    /// Class, attributes, skills and appearance.
    #[default]
    #[strum(serialize = "1.0")]
    #[serde(rename = "1.0")]
    V1_0,

    /// Adds `level` and the non-attribute stats.
    #[strum(serialize = "1.1")]
    #[serde(rename = "1.1")]
    V1_1,
}

impl SchemaVersion {
    pub fn parse(version: &str) -> Result<Self, ExportError> {
        Self::from_str(version).map_err(|_| ExportError::UnsupportedSchemaVersion {
            version: version.to_owned(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported schema version `{version}`")]
    UnsupportedSchemaVersion { version: String },

    #[error("failed to encode export document: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_appearance: bool,
    pub schema_version: SchemaVersion,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_appearance: true,
            schema_version: SchemaVersion::V1_0,
        }
    }
}

/// The exported document. Build a fresh one per export request.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ExportDocument {
    #[serde(rename = "schemaVersion")]
    pub schema_version: SchemaVersion,
    pub character: CharacterExport,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CharacterExport {
    pub class: ClassId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub attributes: AttributeSet<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<StatId, i64>>,
    pub skills: Vec<SkillId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<Appearance>,
}

impl ExportDocument {
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// SHA-256 of the compact JSON, hex encoded.
    pub fn fingerprint(&self) -> Result<String, ExportError> {
        let json = self.to_json()?;
        Ok(hex::encode(Sha256::digest(json.as_bytes())))
    }
}

/// Projects `build` into an [`ExportDocument`].
pub fn export(build: &ResolvedBuild, options: &ExportOptions) -> ExportDocument {
    let stats = build.stats();
    let extended = options.schema_version == SchemaVersion::V1_1;

    let character = CharacterExport {
        class: build.class().id.clone(),
        level: extended.then_some(build.level()),
        attributes: stats.attributes().map(|_, v| v.round_half_up()),
        stats: extended.then(|| {
            stats
                .derived()
                .map(|(id, value)| (id.clone(), value.round_half_up()))
                .collect()
        }),
        skills: build.selection().iter().cloned().collect(),
        appearance: options
            .include_appearance
            .then(|| build.appearance().clone()),
    };

    ExportDocument {
        schema_version: options.schema_version,
        character,
    }
}
