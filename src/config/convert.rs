//! File loading and conversion into option objects.

use optmerge_core::{Options, Value};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::effective::ConfigError;

/// On-disk format of an option layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayerFormat {
    Toml,
    Json,
}

impl LayerFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(LayerFormat::Toml),
            Some("json") => Ok(LayerFormat::Json),
            other => Err(ConfigError::Unsupported(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Read a layer file, returning its options and the SHA-256 of its bytes.
pub fn load_layer(path: &Path) -> Result<(Options, String, LayerFormat), ConfigError> {
    let format = LayerFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::Parse(format!("Invalid UTF-8: {}", e)))?;
    let options = parse_layer(&contents, format).map_err(|e| match e {
        ConfigError::Shape(_) => ConfigError::Shape(path.display().to_string()),
        other => other,
    })?;

    Ok((options, digest, format))
}

/// Parse layer text. The top level must be a table/object.
pub fn parse_layer(contents: &str, format: LayerFormat) -> Result<Options, ConfigError> {
    let json = match format {
        LayerFormat::Toml => {
            let toml_value: toml::Value = toml::from_str(contents)
                .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
            toml_to_json(toml_value)
        }
        LayerFormat::Json => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?,
    };

    match Value::from_json(json) {
        Value::Object(options) => Ok(options),
        _ => Err(ConfigError::Shape("<inline>".to_string())),
    }
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> serde_json::Value {
    match toml {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
