//! optmerge - declarative option merging
//!
//! This crate layers option files on top of the `optmerge-core` merge
//! engine: per-field merge strategies, shorthand normalization,
//! `extends`/`mixins` inheritance and asset resolution.

pub mod config;

pub use config::{ConfigError, EffectiveOptions, EngineSettings, LayerFormat, OptionsSource};
pub use optmerge_core::*;
