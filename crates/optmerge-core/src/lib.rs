//! Strategy-driven option merging.
//!
//! Given parent options and child options, [`Merger::merge_options`]
//! produces one merged option object. Each field is combined by the strategy
//! registered for it: lifecycle hooks concatenate, asset registries link to
//! their parent registry, watchers collect callbacks, data producers
//! deep-merge their results, and everything else lets the child override.
//! Child options are normalized first and their `extends`/`mixins` sources
//! are folded in beneath them.
//!
//! Nothing here fails. Anomalies are reported to a [`WarnSink`] and the merge
//! carries on.

mod casing;
mod component;
mod diagnostics;
mod field;
mod instance;
mod linked;
mod merge;
mod normalize;
mod reactive;
mod resolve;
pub mod strategy;
mod tags;
mod value;

pub use casing::{camelize, capitalize};
pub use component::{check_components, validate_component_name, ComponentType};
pub use diagnostics::{CollectingSink, Diagnostic, SilentSink, TracingSink, WarnSink, Warning};
pub use field::{AssetKind, FieldKey, LifecycleHook};
pub use instance::Instance;
pub use linked::LinkedMap;
pub use merge::{Merger, MergerBuilder, Source};
pub use normalize::{normalize, normalize_directives, normalize_inject, normalize_props};
pub use reactive::{PlainSetter, ReactiveSetter};
pub use resolve::resolve_asset;
pub use strategy::{DefaultStrategy, MergeContext, MergeStrategy, StrategyRegistry};
pub use tags::ReservedTags;
pub use value::{object, object_to_json, CallError, Function, Object, Options, Value};
