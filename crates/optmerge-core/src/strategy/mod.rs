//! Per-field merge strategies and the registry that dispatches them.
//!
//! A strategy combines the parent's and the child's value for one field.
//! The registry maps [`FieldKey`]s to strategies and falls back to
//! [`DefaultStrategy`] (child wins unless unset) for everything else.
//!
//! The registry is populated once, may be extended by the host before any
//! merge runs, and is read-only while merging.

mod assets;
mod data;
mod hooks;
mod object;
mod restricted;
mod watch;

pub use assets::AssetStrategy;
pub use data::{merge_data, DataStrategy, ProvideStrategy};
pub use hooks::HookStrategy;
pub use object::ObjectStrategy;
pub use restricted::RestrictedStrategy;
pub use watch::WatchStrategy;

use std::collections::HashMap;
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, WarnSink};
use crate::field::{AssetKind, FieldKey, LifecycleHook};
use crate::instance::Instance;
use crate::reactive::ReactiveSetter;
use crate::value::Value;

/// Everything a strategy may consult besides the two values.
pub struct MergeContext<'a> {
    key: &'a str,
    vm: Option<&'a Instance>,
    sink: &'a dyn WarnSink,
    setter: &'a Arc<dyn ReactiveSetter>,
}

impl<'a> MergeContext<'a> {
    pub fn new(
        key: &'a str,
        vm: Option<&'a Instance>,
        sink: &'a dyn WarnSink,
        setter: &'a Arc<dyn ReactiveSetter>,
    ) -> Self {
        Self {
            key,
            vm,
            sink,
            setter,
        }
    }

    /// Name of the field being merged.
    pub fn key(&self) -> &str {
        self.key
    }

    pub fn vm(&self) -> Option<&Instance> {
        self.vm
    }

    pub fn warn(&self, diagnostic: Diagnostic) {
        self.sink.warn(&diagnostic, self.vm);
    }

    pub fn setter(&self) -> Arc<dyn ReactiveSetter> {
        Arc::clone(self.setter)
    }

    /// Warn unless `value` is object shaped.
    pub(crate) fn assert_object_type(&self, value: &Value) {
        if !value.is_plain_object() {
            self.warn(Diagnostic::InvalidObjectType {
                option: self.key.to_string(),
                got: value.type_name().to_string(),
            });
        }
    }
}

/// A merge function for one field category.
///
/// Must not depend on anything but its inputs. Returning `None` leaves the
/// field out of the merged options.
pub trait MergeStrategy: Send + Sync {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value>;
}

impl<F> MergeStrategy for F
where
    F: Fn(Option<&Value>, Option<&Value>, &MergeContext<'_>) -> Option<Value> + Send + Sync,
{
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        self(parent, child, cx)
    }
}

/// Child's value unless unset, else parent's. `null` counts as set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl DefaultStrategy {
    pub fn apply(parent: Option<&Value>, child: Option<&Value>) -> Option<Value> {
        child.or(parent).cloned()
    }
}

impl MergeStrategy for DefaultStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        _cx: &MergeContext<'_>,
    ) -> Option<Value> {
        Self::apply(parent, child)
    }
}

/// Field key to strategy table.
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<FieldKey, Arc<dyn MergeStrategy>>,
    fallback: Arc<dyn MergeStrategy>,
}

impl StrategyRegistry {
    /// Only the default strategy; every field uses it.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(DefaultStrategy),
        }
    }

    /// The built-in strategy set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        let restricted: Arc<dyn MergeStrategy> = Arc::new(RestrictedStrategy);
        registry.insert(FieldKey::El, Arc::clone(&restricted));
        registry.insert(FieldKey::PropsData, restricted);

        registry.insert(FieldKey::Data, Arc::new(DataStrategy));
        registry.insert(FieldKey::Provide, Arc::new(ProvideStrategy));

        let hooks: Arc<dyn MergeStrategy> = Arc::new(HookStrategy);
        for hook in LifecycleHook::ALL {
            registry.insert(FieldKey::Hook(hook), Arc::clone(&hooks));
        }

        let assets: Arc<dyn MergeStrategy> = Arc::new(AssetStrategy);
        for kind in AssetKind::ALL {
            registry.insert(FieldKey::Assets(kind), Arc::clone(&assets));
        }

        registry.insert(FieldKey::Watch, Arc::new(WatchStrategy));

        let objects: Arc<dyn MergeStrategy> = Arc::new(ObjectStrategy);
        for key in [
            FieldKey::Props,
            FieldKey::Methods,
            FieldKey::Inject,
            FieldKey::Computed,
        ] {
            registry.insert(key, Arc::clone(&objects));
        }

        registry
    }

    /// Register or replace the strategy for a field.
    pub fn set<K, S>(&mut self, key: K, strategy: S) -> &mut Self
    where
        K: Into<FieldKey>,
        S: MergeStrategy + 'static,
    {
        self.insert(key.into(), Arc::new(strategy));
        self
    }

    pub fn insert(&mut self, key: FieldKey, strategy: Arc<dyn MergeStrategy>) {
        self.strategies.insert(key, strategy);
    }

    pub fn remove(&mut self, key: &FieldKey) -> Option<Arc<dyn MergeStrategy>> {
        self.strategies.remove(key)
    }

    /// The strategy registered for `key`, without fallback.
    pub fn get(&self, key: &FieldKey) -> Option<&Arc<dyn MergeStrategy>> {
        self.strategies.get(key)
    }

    pub fn contains(&self, key: &FieldKey) -> bool {
        self.strategies.contains_key(key)
    }

    /// The strategy to use for `key`, falling back to the default.
    pub fn resolve(&self, key: &FieldKey) -> &dyn MergeStrategy {
        self.strategies
            .get(key)
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// Field names with a registered strategy, sorted.
    pub fn fields(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .strategies
            .keys()
            .map(|k| k.as_str().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::reactive::PlainSetter;

    /// Run one strategy against a collecting sink.
    pub fn run(
        strategy: &dyn MergeStrategy,
        key: &str,
        parent: Option<&Value>,
        child: Option<&Value>,
        vm: Option<&Instance>,
    ) -> (Option<Value>, CollectingSink) {
        let sink = CollectingSink::new();
        let setter: Arc<dyn ReactiveSetter> = Arc::new(PlainSetter);
        let out = {
            let cx = MergeContext::new(key, vm, &sink, &setter);
            strategy.merge(parent, child, &cx)
        };
        (out, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::run;
    use super::*;

    #[test]
    fn test_default_strategy() {
        let p = Value::from(1);
        let c = Value::from(2);
        assert_eq!(DefaultStrategy::apply(Some(&p), Some(&c)), Some(c.clone()));
        assert_eq!(DefaultStrategy::apply(Some(&p), None), Some(p.clone()));
        assert_eq!(DefaultStrategy::apply(None, None), None);
        assert_eq!(
            DefaultStrategy::apply(Some(&p), Some(&Value::Null)),
            Some(Value::Null)
        );
    }

    #[test]
    fn test_defaults_cover_every_category() {
        let registry = StrategyRegistry::with_defaults();
        for hook in LifecycleHook::ALL {
            assert!(registry.contains(&hook.into()));
        }
        for kind in AssetKind::ALL {
            assert!(registry.contains(&kind.into()));
        }
        for name in [
            "el",
            "propsData",
            "data",
            "provide",
            "watch",
            "props",
            "methods",
            "inject",
            "computed",
        ] {
            assert!(registry.contains(&FieldKey::parse(name)), "missing {name}");
        }
        assert!(!registry.contains(&FieldKey::parse("name")));
    }

    fn join_names(
        parent: Option<&Value>,
        child: Option<&Value>,
        _cx: &MergeContext<'_>,
    ) -> Option<Value> {
        match (parent.and_then(Value::as_str), child.and_then(Value::as_str)) {
            (Some(p), Some(c)) => Some(Value::from(format!("{p}.{c}"))),
            _ => DefaultStrategy::apply(parent, child),
        }
    }

    #[test]
    fn test_custom_strategy_overrides() {
        let mut registry = StrategyRegistry::with_defaults();
        registry.set("name", join_names);

        let strategy = registry.resolve(&FieldKey::parse("name"));
        let (out, _) = run(strategy, "name", Some(&"a".into()), Some(&"b".into()), None);
        assert_eq!(out, Some(Value::from("a.b")));
    }

    #[test]
    fn test_unregistered_field_uses_default() {
        let registry = StrategyRegistry::with_defaults();
        let strategy = registry.resolve(&FieldKey::parse("template"));
        let (out, sink) = run(strategy, "template", Some(&"p".into()), Some(&"c".into()), None);
        assert_eq!(out, Some(Value::from("c")));
        assert!(sink.is_empty());
    }
}
