//! Layered option files
//!
//! Loads option layers from TOML/JSON files and folds them with the merge
//! driver, first file at the bottom:
//! 1. Shared base options (e.g. global registrations)
//! 2. Intermediate layers (mixins, presets)
//! 3. The component's own options

mod convert;
mod effective;
mod settings;

pub use convert::{load_layer, parse_layer, LayerFormat};
pub use effective::{ConfigError, EffectiveOptions, OptionsSource, SCHEMA_ID, SCHEMA_VERSION};
pub use settings::EngineSettings;
