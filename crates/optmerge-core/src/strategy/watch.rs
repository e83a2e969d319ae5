//! Watchers: every watched name collects callbacks from parent and child,
//! parent's first.

use std::sync::Arc;

use super::{MergeContext, MergeStrategy};
use crate::linked::LinkedMap;
use crate::value::{present, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct WatchStrategy;

/// A platform builtin named `watch` can surface where the field is read
/// through an object's prototype. It never counts as a user value.
fn is_native_watch(value: &Value) -> bool {
    matches!(value, Value::Function(f) if f.is_builtin() && f.name() == "watch")
}

fn declared(value: Option<&Value>) -> Option<&Value> {
    present(value).filter(|v| !is_native_watch(v))
}

impl MergeStrategy for WatchStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        let parent = declared(parent);
        let Some(child) = declared(child) else {
            let linked = LinkedMap::new(parent.and_then(Value::to_ancestor));
            return Some(Value::Linked(Arc::new(linked)));
        };
        cx.assert_object_type(child);
        let Some(parent) = parent else {
            return Some(child.clone());
        };

        let mut merged = parent.entries().unwrap_or_default();
        for (name, handler) in child.entries().unwrap_or_default() {
            let handlers = match merged.get(&name) {
                Some(existing) => {
                    let mut seq = existing.to_sequence();
                    seq.extend(handler.to_sequence());
                    seq
                }
                None => handler.to_sequence(),
            };
            merged.insert(name, Value::Array(handlers));
        }
        Some(Value::Object(merged))
    }
}
