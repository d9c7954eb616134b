//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use character_core::{EngineConfig, SchemaVersion};

/// Where content lives and which engine switches the environment overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub overrides: EngineOverrides,
}

impl RuntimeConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: EngineOverrides::default(),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHARFORGE_DATA_DIR` - Content directory (default: `data`)
    /// - `CHARFORGE_STRICT_DUPLICATES` - Reject repeated skills (bool)
    /// - `CHARFORGE_INCLUDE_APPEARANCE` - Export appearance (bool)
    /// - `CHARFORGE_SCHEMA_VERSION` - Export schema, `1.0` or `1.1`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("CHARFORGE_DATA_DIR")
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_owned());

        let overrides = EngineOverrides {
            strict_duplicates: read_bool(&lookup, "CHARFORGE_STRICT_DUPLICATES"),
            include_appearance: read_bool(&lookup, "CHARFORGE_INCLUDE_APPEARANCE"),
            schema_version: read_parsed(&lookup, "CHARFORGE_SCHEMA_VERSION"),
        };

        Self {
            data_dir: PathBuf::from(data_dir),
            overrides,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DATA_DIR)
    }
}

/// Engine switches set outside `config.toml`. `None` keeps the file value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOverrides {
    pub strict_duplicates: Option<bool>,
    pub include_appearance: Option<bool>,
    pub schema_version: Option<SchemaVersion>,
}

impl EngineOverrides {
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(strict) = self.strict_duplicates {
            config.strict_duplicates = strict;
        }
        if let Some(include) = self.include_appearance {
            config.include_appearance = include;
        }
        if let Some(version) = self.schema_version {
            config.schema_version = version;
        }
        config
    }
}

fn read_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!("Ignoring {}: cannot parse {:?}", key, raw);
    }
    parsed
}

fn read_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("Ignoring {}: expected a boolean, got {:?}", key, raw);
            None
        }
    }
}
