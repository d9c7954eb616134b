use crate::export::{ExportOptions, SchemaVersion};
use crate::validate::ValidationOptions;

/// Engine switches loaded from `config.toml`. Missing fields take their
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reject repeated skill ids instead of collapsing them.
    pub strict_duplicates: bool,
    /// Include the appearance map in exports.
    pub include_appearance: bool,
    pub schema_version: SchemaVersion,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STRICT_DUPLICATES: bool = false;
    pub const DEFAULT_INCLUDE_APPEARANCE: bool = true;
    pub const DEFAULT_SCHEMA_VERSION: SchemaVersion = SchemaVersion::V1_0;

    pub fn new() -> Self {
        Self {
            strict_duplicates: Self::DEFAULT_STRICT_DUPLICATES,
            include_appearance: Self::DEFAULT_INCLUDE_APPEARANCE,
            schema_version: Self::DEFAULT_SCHEMA_VERSION,
        }
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict_duplicates: self.strict_duplicates,
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_appearance: self.include_appearance,
            schema_version: self.schema_version,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_option_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.validation_options(), ValidationOptions::default());
        assert_eq!(config.export_options(), ExportOptions::default());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"schema_version":"1.1","strict_duplicates":true}"#).unwrap();
        assert!(config.strict_duplicates);
        assert!(config.include_appearance);
        assert_eq!(config.export_options().schema_version, SchemaVersion::V1_1);
    }
}
