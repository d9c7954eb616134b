//! Build request loader.
//!
//! Requests may be authored as RON (hand-written fixtures) or JSON (what
//! transport layers receive). The format is picked from the file extension.

use std::path::Path;

use character_core::BuildRequest;

use crate::loaders::{LoadResult, read_file};

/// Loader for build requests from RON or JSON files.
pub struct BuildLoader;

impl BuildLoader {
    pub fn load(path: &Path) -> LoadResult<BuildRequest> {
        let content = read_file(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content),
            Some("ron") => Self::parse_ron(&content),
            other => Err(anyhow::anyhow!(
                "Unsupported build file extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            )),
        }
    }

    pub fn parse_json(content: &str) -> LoadResult<BuildRequest> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse build request JSON: {}", e))
    }

    pub fn parse_ron(content: &str) -> LoadResult<BuildRequest> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse build request RON: {}", e))
    }
}
