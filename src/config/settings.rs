//! Engine settings
//!
//! Optional TOML file tuning how merges report and which element names
//! components may not take.

use optmerge_core::{MergerBuilder, ReservedTags, StrategyRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::effective::ConfigError;

/// Engine settings (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// Suppress all merge warnings (default: false)
    #[serde(default)]
    pub silent: bool,

    /// Element names components may not use (default: HTML and SVG tags)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_tags: Option<Vec<String>>,
}

impl EngineSettings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))
    }

    pub fn reserved_tags(&self) -> ReservedTags {
        match &self.reserved_tags {
            Some(tags) => tags.iter().cloned().collect(),
            None => ReservedTags::web(),
        }
    }

    /// A merger builder with these settings applied
    pub fn merger_builder(&self) -> MergerBuilder {
        optmerge_core::Merger::builder()
            .strategies(StrategyRegistry::with_defaults())
            .reserved_tags(self.reserved_tags())
            .silent(self.silent)
    }
}
