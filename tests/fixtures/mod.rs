//! Option layer fixtures
//!
//! - `layers/base.toml`: global registrations
//! - `layers/card.json`: a component with props, a mixin and local assets
//! - `layers/card-data.json`, `layers/instance.toml`: data for instance merges

use std::path::{Path, PathBuf};

/// Path to a layer fixture
pub fn layer_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/layers")
        .join(name)
}

/// Path to the engine settings fixture
pub fn settings_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/settings.toml")
}
