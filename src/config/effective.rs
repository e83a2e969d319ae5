//! Effective options with full provenance
//!
//! The effective options capture the merged option object plus the files it
//! was folded from and every warning raised while merging.

use chrono::{DateTime, Utc};
use optmerge_core::{
    resolve_asset, AssetKind, CollectingSink, Instance, Merger, Options, SilentSink, Value,
    WarnSink, Warning,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::convert::{load_layer, LayerFormat};
use super::settings::EngineSettings;

/// Schema version for the rendered report
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "optmerge/effective_options@1";

/// Fields whose merged value is a producer that `--evaluate` invokes
const PRODUCER_FIELDS: &[&str] = &["data", "provide"];

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionsSource {
    /// File path
    pub path: String,

    /// SHA-256 digest of raw file bytes
    pub digest: String,

    /// Layer format
    pub format: LayerFormat,
}

/// Merged options with provenance
#[derive(Debug, Clone)]
pub struct EffectiveOptions {
    /// When these options were computed
    pub created_at: DateTime<Utc>,

    /// Instance the merge ran for (None for a type-definition merge)
    pub instance: Option<Instance>,

    /// The merged options
    pub options: Options,

    /// Contributing layers in precedence order (lowest first)
    pub sources: Vec<OptionsSource>,

    /// Warnings raised while merging
    pub warnings: Vec<Warning>,
}

#[derive(Serialize)]
struct Rendered<'a> {
    schema_version: u32,
    schema_id: &'static str,
    created_at: DateTime<Utc>,
    instance: bool,
    sources: &'a [OptionsSource],
    warnings: &'a [Warning],
    options: serde_json::Value,
}

impl EffectiveOptions {
    /// Build effective options from layer files, first file lowest
    pub fn build(
        paths: &[&Path],
        settings: &EngineSettings,
        instance: Option<Instance>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::with_capacity(paths.len());
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            let (options, digest, format) = load_layer(path)?;
            tracing::debug!(path = %path.display(), %digest, "loaded option layer");
            layers.push(options);
            sources.push(OptionsSource {
                path: path.to_string_lossy().to_string(),
                digest,
                format,
            });
        }

        Ok(Self::from_layers(layers, sources, settings, instance))
    }

    /// Fold already-parsed layers
    pub fn from_layers(
        layers: Vec<Options>,
        sources: Vec<OptionsSource>,
        settings: &EngineSettings,
        instance: Option<Instance>,
    ) -> Self {
        let sink = Arc::new(CollectingSink::new());
        let builder = settings.merger_builder();
        let merger = if settings.silent {
            builder.build()
        } else {
            builder.sink(sink.clone()).build()
        };

        let options = Self::merge_layers(&merger, layers, instance.as_ref());

        Self {
            created_at: Utc::now(),
            instance,
            options,
            sources,
            warnings: sink.take(),
        }
    }

    /// Merge layers in order (first is base, last has highest precedence)
    pub fn merge_layers(merger: &Merger, layers: Vec<Options>, vm: Option<&Instance>) -> Options {
        layers
            .into_iter()
            .fold(Options::new(), |acc, layer| merger.merge_options(&acc, layer, vm))
    }

    /// Get an option value by path (dot-separated), following registry chains
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.options.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Resolve a named asset in the merged options
    pub fn resolve(&self, kind: AssetKind, name: &str) -> Option<&Value> {
        resolve_asset(&self.options, kind, &Value::from(name), false, &SilentSink)
    }

    /// Resolve a named asset, reporting a miss to `sink`
    pub fn resolve_or_warn(
        &self,
        kind: AssetKind,
        name: &str,
        sink: &dyn WarnSink,
    ) -> Option<&Value> {
        resolve_asset(&self.options, kind, &Value::from(name), true, sink)
    }

    /// Render options as JSON, invoking `data`/`provide` producers if asked
    pub fn render_options(&self, evaluate: bool) -> Result<serde_json::Value, ConfigError> {
        let mut rendered = serde_json::Map::new();
        for (key, value) in &self.options {
            let json = match value {
                Value::Function(producer)
                    if evaluate && PRODUCER_FIELDS.contains(&key.as_str()) =>
                {
                    producer
                        .call(self.instance.as_ref())
                        .map_err(|e| ConfigError::Evaluation {
                            field: key.clone(),
                            message: e.to_string(),
                        })?
                        .to_json()
                }
                other => other.to_json(),
            };
            rendered.insert(key.clone(), json);
        }
        Ok(serde_json::Value::Object(rendered))
    }

    /// Serialize the full report to JSON
    pub fn to_json(&self, evaluate: bool) -> Result<String, ConfigError> {
        let report = Rendered {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID,
            created_at: self.created_at,
            instance: self.instance.is_some(),
            sources: &self.sources,
            warnings: &self.warnings,
            options: self.render_options(evaluate)?,
        };
        serde_json::to_string_pretty(&report)
            .map_err(|e| ConfigError::Parse(format!("JSON serialization failed: {}", e)))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported layer format: {0}")]
    Unsupported(String),

    #[error("Layer is not a table/object: {0}")]
    Shape(String),

    #[error("Producer for \"{field}\" failed: {message}")]
    Evaluation { field: String, message: String },
}
