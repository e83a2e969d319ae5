//! `data` and `provide`: producer merging.
//!
//! Each side may be absent, a plain value or a producer function. The merged
//! value is itself a producer; calling it evaluates both sides (child first)
//! and folds the parent's result into the child's with [`merge_data`].

use std::sync::Arc;

use super::{MergeContext, MergeStrategy};
use crate::diagnostics::Diagnostic;
use crate::instance::Instance;
use crate::reactive::ReactiveSetter;
use crate::value::{present, CallError, Function, Object, Value};

/// `data`: on type definitions the child must be a producer function.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataStrategy;

impl MergeStrategy for DataStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        if cx.vm().is_none() {
            if let Some(child) = present(child) {
                if !child.is_function() {
                    cx.warn(Diagnostic::DataNotFunction);
                    return parent.cloned();
                }
            }
        }
        merge_data_or_fn(parent, child, cx)
    }
}

/// `provide`: same producer merge as `data`, without the function check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvideStrategy;

impl MergeStrategy for ProvideStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        merge_data_or_fn(parent, child, cx)
    }
}

fn merge_data_or_fn(
    parent: Option<&Value>,
    child: Option<&Value>,
    cx: &MergeContext<'_>,
) -> Option<Value> {
    let setter = cx.setter();
    match cx.vm() {
        None => {
            let Some(child) = present(child) else {
                return parent.cloned();
            };
            let Some(parent) = present(parent) else {
                return Some(child.clone());
            };
            let (child, parent) = (child.clone(), parent.clone());
            let merged = Function::new("mergedDataFn", move |vm| {
                let to = produce(&child, vm)?;
                let from = produce(&parent, vm)?;
                Ok(merge_data(to, Some(from), setter.as_ref()))
            });
            Some(Value::Function(merged))
        }
        Some(vm) => {
            let vm = vm.clone();
            let child = present(child).cloned();
            let parent = present(parent).cloned();
            let merged = Function::new("mergedInstanceDataFn", move |_| {
                let instance_data = child.as_ref().map(|c| produce(c, Some(&vm))).transpose()?;
                let default_data = parent.as_ref().map(|p| produce(p, Some(&vm))).transpose()?;
                Ok(match instance_data.filter(|d| !d.is_null()) {
                    Some(data) => merge_data(data, default_data, setter.as_ref()),
                    None => default_data.unwrap_or(Value::Null),
                })
            });
            Some(Value::Function(merged))
        }
    }
}

/// Call producers, clone plain values.
fn produce(value: &Value, vm: Option<&Instance>) -> Result<Value, CallError> {
    match value {
        Value::Function(f) => f.call(vm),
        other => Ok(other.clone()),
    }
}

/// Fold `from` into `to` and return `to`.
///
/// Keys missing from `to` are introduced through `setter`. Keys present on
/// both sides recurse only while both values are plain objects (with or
/// without an ancestor chain); any other collision keeps `to`'s value. A
/// chained map on the `to` side is flattened into its own copy before keys
/// are added to it.
pub fn merge_data(mut to: Value, from: Option<Value>, setter: &dyn ReactiveSetter) -> Value {
    if let Some(from_map) = from.as_ref().and_then(Value::entries) {
        if let Some(to_map) = as_plain_mut(&mut to) {
            merge_into(to_map, &from_map, setter);
        }
    }
    to
}

fn as_plain_mut(value: &mut Value) -> Option<&mut Object> {
    let flattened = match value {
        Value::Linked(map) => Some(map.flatten()),
        _ => None,
    };
    if let Some(map) = flattened {
        *value = Value::Object(map);
    }
    value.as_object_mut()
}

fn merge_into(to: &mut Object, from: &Object, setter: &dyn ReactiveSetter) {
    for (key, from_value) in from {
        match to.get_mut(key) {
            None => setter.set(to, key, from_value.clone()),
            Some(to_value) => {
                if !to_value.is_plain_object() {
                    continue;
                }
                if let Some(from_map) = from_value.entries() {
                    if let Some(to_map) = as_plain_mut(to_value) {
                        merge_into(to_map, &from_map, setter);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::PlainSetter;
    use crate::strategy::test_support::run;
    use crate::value::object;
    use serde_json::json;
    use std::sync::Mutex;

    fn producer(json: serde_json::Value) -> Value {
        Value::Function(Function::returning("data", Value::from_json(json)))
    }

    fn call(value: &Value, vm: Option<&Instance>) -> serde_json::Value {
        value.as_function().unwrap().call(vm).unwrap().to_json()
    }

    #[test]
    fn test_deep_merge_child_wins() {
        let parent = producer(json!({"a": 1, "nested": {"x": 1, "y": 1}, "only_parent": true}));
        let child = producer(json!({"a": 2, "nested": {"y": 2}}));
        let (out, sink) = run(&DataStrategy, "data", Some(&parent), Some(&child), None);
        assert!(sink.is_empty());
        assert_eq!(
            call(&out.unwrap(), None),
            json!({"a": 2, "nested": {"y": 2, "x": 1}, "only_parent": true})
        );
    }

    #[test]
    fn test_non_object_collision_keeps_child() {
        let parent = producer(json!({"list": [1, 2], "obj": {"k": 1}}));
        let child = producer(json!({"list": [3], "obj": "scalar"}));
        let (out, _) = run(&DataStrategy, "data", Some(&parent), Some(&child), None);
        assert_eq!(call(&out.unwrap(), None), json!({"list": [3], "obj": "scalar"}));
    }

    #[test]
    fn test_plain_data_on_definition_is_discarded() {
        let parent = producer(json!({"a": 1}));
        let child = Value::from_json(json!({"a": 2}));
        let (out, sink) = run(&DataStrategy, "data", Some(&parent), Some(&child), None);
        assert_eq!(out, Some(parent));
        assert_eq!(sink.diagnostics(), vec![Diagnostic::DataNotFunction]);
    }

    #[test]
    fn test_single_side_passes_through_without_instance() {
        let child = producer(json!({"a": 1}));
        let (out, _) = run(&DataStrategy, "data", None, Some(&child), None);
        assert_eq!(out, Some(child));

        let parent = producer(json!({"a": 1}));
        let (out, _) = run(&DataStrategy, "data", Some(&parent), None, None);
        assert_eq!(out, Some(parent));
    }

    #[test]
    fn test_instance_merge_accepts_plain_values() {
        let vm = Instance::new(3);
        let parent = producer(json!({"a": 1, "b": 1}));
        let child = Value::from_json(json!({"b": 2}));
        let (out, sink) = run(&DataStrategy, "data", Some(&parent), Some(&child), Some(&vm));
        assert!(sink.is_empty());
        assert_eq!(call(&out.unwrap(), None), json!({"b": 2, "a": 1}));
    }

    #[test]
    fn test_instance_merge_without_child_data() {
        let vm = Instance::new(3);
        let parent = producer(json!({"a": 1}));
        let (out, _) = run(&DataStrategy, "data", Some(&parent), None, Some(&vm));
        assert_eq!(call(&out.unwrap(), None), json!({"a": 1}));
    }

    #[test]
    fn test_producers_see_bound_instance() {
        let vm = Instance::new(9).with_state("seed", 41);
        let child = Value::Function(Function::new("data", |vm| {
            let seed = vm.and_then(|vm| vm.get("seed")).cloned().unwrap_or(Value::Null);
            Ok(Value::Object(object([("seed", seed)])))
        }));
        let (out, _) = run(&DataStrategy, "data", None, Some(&child), Some(&vm));
        assert_eq!(call(&out.unwrap(), None), json!({"seed": 41}));
    }

    #[test]
    fn test_producer_failure_propagates() {
        let parent = producer(json!({"a": 1}));
        let child = Value::Function(Function::new("data", |_| Err(CallError::new("boom"))));
        let (out, _) = run(&DataStrategy, "data", Some(&parent), Some(&child), None);
        let err = out.unwrap().as_function().unwrap().call(None).unwrap_err();
        assert_eq!(err, CallError::new("boom"));
    }

    #[test]
    fn test_provide_skips_function_check() {
        let parent = Value::from_json(json!({"theme": "dark"}));
        let child = Value::from_json(json!({"locale": "en"}));
        let (out, sink) = run(&ProvideStrategy, "provide", Some(&parent), Some(&child), None);
        assert!(sink.is_empty());
        assert_eq!(call(&out.unwrap(), None), json!({"locale": "en", "theme": "dark"}));
    }

    #[derive(Default)]
    struct RecordingSetter {
        keys: Mutex<Vec<String>>,
    }

    impl ReactiveSetter for RecordingSetter {
        fn set(&self, target: &mut Object, key: &str, value: Value) {
            self.keys.lock().unwrap().push(key.to_string());
            target.insert(key.to_string(), value);
        }
    }

    #[test]
    fn test_new_keys_go_through_setter() {
        let setter = RecordingSetter::default();
        let to = Value::from_json(json!({"shared": {"a": 1}}));
        let from = Value::from_json(json!({"shared": {"a": 0, "b": 2}, "extra": 3}));
        let merged = merge_data(to, Some(from), &setter);

        assert_eq!(merged.to_json(), json!({"shared": {"a": 1, "b": 2}, "extra": 3}));
        assert_eq!(*setter.keys.lock().unwrap(), vec!["b", "extra"]);
    }

    #[test]
    fn test_chained_maps_merge_like_objects() {
        use crate::linked::LinkedMap;
        use std::sync::Arc;

        let inherited = Arc::new(LinkedMap::root(object([("a", 1)])));
        let mut chained = LinkedMap::new(Some(inherited));
        chained.insert("b", Value::from(2));

        let mut to = Object::new();
        to.insert("shared".into(), Value::from(chained));
        let from = Value::from_json(json!({"shared": {"a": 0, "c": 3}, "extra": true}));

        let merged = merge_data(Value::Object(to), Some(from), &PlainSetter);
        assert_eq!(
            merged.to_json(),
            json!({"shared": {"b": 2, "a": 1, "c": 3}, "extra": true})
        );
        assert!(merged.get("shared").and_then(Value::as_object).is_some());
    }

    #[test]
    fn test_merge_data_without_source() {
        let to = Value::from_json(json!({"a": 1}));
        assert_eq!(merge_data(to.clone(), None, &PlainSetter), to);
    }
}
