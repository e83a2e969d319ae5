//! The merge driver.
//!
//! `merge_options(parent, child, vm)`:
//! 1. component types are replaced by their options
//! 2. declared component names are checked
//! 3. the child's shorthand declarations are normalized
//! 4. `extends`, then each of `mixins` in order, is folded into the parent
//!    (skipped for derived component types, which already carry them)
//! 5. every field of the parent, then every child-only field, is merged
//!    with its registered strategy (or the default one)

use std::borrow::Cow;
use std::sync::Arc;

use crate::component::{check_components, validate_component_name, ComponentType};
use crate::diagnostics::{SilentSink, TracingSink, WarnSink};
use crate::field::{AssetKind, FieldKey};
use crate::instance::Instance;
use crate::normalize::normalize;
use crate::reactive::{PlainSetter, ReactiveSetter};
use crate::resolve::resolve_asset;
use crate::strategy::{MergeContext, StrategyRegistry};
use crate::tags::ReservedTags;
use crate::value::{Options, Value};

/// Something that can sit on the child side of a merge.
#[derive(Debug, Clone)]
pub enum Source {
    Options(Options),
    Component(Arc<ComponentType>),
}

impl Source {
    /// Object-shaped values and component types; anything else is not a
    /// merge source.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Source::Options(map.clone())),
            Value::Linked(map) => Some(Source::Options(map.flatten())),
            Value::Component(c) => Some(Source::Component(Arc::clone(c))),
            _ => None,
        }
    }

    /// True for component types whose options are a merge result. Their
    /// `extends`/`mixins` entries are already applied.
    pub fn is_merged(&self) -> bool {
        matches!(self, Source::Component(c) if c.is_merged())
    }

    pub fn into_options(self) -> Options {
        match self {
            Source::Options(options) => options,
            Source::Component(c) => c.options().clone(),
        }
    }
}

impl From<Options> for Source {
    fn from(options: Options) -> Self {
        Source::Options(options)
    }
}

impl From<ComponentType> for Source {
    fn from(component: ComponentType) -> Self {
        Source::Component(Arc::new(component))
    }
}

impl From<Arc<ComponentType>> for Source {
    fn from(component: Arc<ComponentType>) -> Self {
        Source::Component(component)
    }
}

/// Merges option objects. Owns its strategy table and collaborators.
#[derive(Clone)]
pub struct Merger {
    strategies: StrategyRegistry,
    sink: Arc<dyn WarnSink>,
    setter: Arc<dyn ReactiveSetter>,
    tags: ReservedTags,
}

impl Merger {
    /// Built-in strategies, `tracing` warnings, plain setter, web tags.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> MergerBuilder {
        MergerBuilder::default()
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    pub fn sink(&self) -> &dyn WarnSink {
        self.sink.as_ref()
    }

    pub fn tags(&self) -> &ReservedTags {
        &self.tags
    }

    /// Merge `child` over `parent`. Neither input is modified.
    pub fn merge_options(
        &self,
        parent: &Options,
        child: impl Into<Source>,
        vm: Option<&Instance>,
    ) -> Options {
        let source = child.into();
        let already_folded = source.is_merged();
        let mut child = source.into_options();

        check_components(&child, &self.tags, self.sink(), vm);
        normalize(&mut child, self.sink(), vm);

        let folded = if already_folded {
            Cow::Borrowed(parent)
        } else {
            self.fold_ancestors(parent, &child, vm)
        };
        let parent: &Options = &folded;

        let mut merged = Options::with_capacity(parent.len() + child.len());
        for key in parent.keys() {
            self.merge_field(key, parent, &child, vm, &mut merged);
        }
        for key in child.keys() {
            if !parent.contains_key(key) {
                self.merge_field(key, parent, &child, vm, &mut merged);
            }
        }
        merged
    }

    /// Apply `extends` and then `mixins` beneath the child, left to right.
    fn fold_ancestors<'p>(
        &self,
        parent: &'p Options,
        child: &Options,
        vm: Option<&Instance>,
    ) -> Cow<'p, Options> {
        let extends = child.get("extends").and_then(Source::from_value);
        let mixins: Vec<Source> = child
            .get("mixins")
            .and_then(Value::as_array)
            .map(|mixins| mixins.iter().filter_map(Source::from_value).collect())
            .unwrap_or_default();

        extends
            .into_iter()
            .chain(mixins)
            .fold(Cow::Borrowed(parent), |acc, source| {
                Cow::Owned(self.merge_options(&acc, source, vm))
            })
    }

    fn merge_field(
        &self,
        key: &str,
        parent: &Options,
        child: &Options,
        vm: Option<&Instance>,
        merged: &mut Options,
    ) {
        let strategy = self.strategies.resolve(&FieldKey::parse(key));
        let cx = MergeContext::new(key, vm, self.sink(), &self.setter);
        if let Some(value) = strategy.merge(parent.get(key), child.get(key), &cx) {
            merged.insert(key.to_string(), value);
        }
    }

    /// Derive a new component type from `base`.
    ///
    /// The new type's options are `base`'s options merged with
    /// `extend_options`; its name is `extend_options.name` or the base name.
    pub fn extend(&self, base: &Arc<ComponentType>, extend_options: Options) -> ComponentType {
        let name = extend_options
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| base.name().map(str::to_string));
        if let Some(name) = &name {
            validate_component_name(name, &self.tags, self.sink(), None);
        }

        let options = self.merge_options(base.options(), extend_options, None);
        let derived = match name {
            Some(name) => ComponentType::named(name, options),
            None => ComponentType::new(options),
        };
        derived.with_base(Arc::clone(base))
    }

    /// Fold a global mixin into global options.
    pub fn mixin(&self, global: &Options, mixin: impl Into<Source>) -> Options {
        self.merge_options(global, mixin, None)
    }

    /// See [`resolve_asset`].
    pub fn resolve_asset<'a>(
        &self,
        options: &'a Options,
        kind: AssetKind,
        id: &Value,
        warn_missing: bool,
    ) -> Option<&'a Value> {
        resolve_asset(options, kind, id, warn_missing, self.sink())
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures a [`Merger`].
pub struct MergerBuilder {
    strategies: StrategyRegistry,
    sink: Arc<dyn WarnSink>,
    setter: Arc<dyn ReactiveSetter>,
    tags: ReservedTags,
}

impl Default for MergerBuilder {
    fn default() -> Self {
        Self {
            strategies: StrategyRegistry::with_defaults(),
            sink: Arc::new(TracingSink),
            setter: Arc::new(PlainSetter),
            tags: ReservedTags::web(),
        }
    }
}

impl MergerBuilder {
    pub fn strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn WarnSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Drop all warnings.
    pub fn silent(self, silent: bool) -> Self {
        if silent {
            self.sink(Arc::new(SilentSink))
        } else {
            self
        }
    }

    pub fn setter(mut self, setter: Arc<dyn ReactiveSetter>) -> Self {
        self.setter = setter;
        self
    }

    pub fn reserved_tags(mut self, tags: ReservedTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn build(self) -> Merger {
        Merger {
            strategies: self.strategies,
            sink: self.sink,
            setter: self.setter,
            tags: self.tags,
        }
    }
}
