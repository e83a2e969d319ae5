//! `props`, `methods`, `inject` and `computed`: flat name maps where the
//! child's entries replace the parent's on collision.

use super::{MergeContext, MergeStrategy};
use crate::value::{present, Object, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectStrategy;

impl MergeStrategy for ObjectStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        let child = present(child);
        if let Some(child) = child {
            cx.assert_object_type(child);
        }
        let Some(parent) = present(parent) else {
            return child.cloned();
        };

        let mut merged: Object = parent.entries().unwrap_or_default();
        if let Some(entries) = child.and_then(Value::entries) {
            merged.extend(entries);
        }
        Some(Value::Object(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::run;
    use crate::value::object;

    #[test]
    fn test_child_wins_on_collision() {
        let parent = Value::Object(object([("a", 1), ("b", 2)]));
        let child = Value::Object(object([("b", 20), ("c", 30)]));
        let (out, _) = run(&ObjectStrategy, "methods", Some(&parent), Some(&child), None);
        assert_eq!(
            out,
            Some(Value::Object(object([("a", 1), ("b", 20), ("c", 30)])))
        );
    }

    #[test]
    fn test_absent_parent_returns_child() {
        let child = Value::Object(object([("x", true)]));
        let (out, _) = run(&ObjectStrategy, "computed", None, Some(&child), None);
        assert_eq!(out, Some(child));
    }

    #[test]
    fn test_absent_child_copies_parent() {
        let parent = Value::Object(object([("x", true)]));
        let (out, _) = run(&ObjectStrategy, "props", Some(&parent), None, None);
        assert_eq!(out, Some(parent));
    }

    #[test]
    fn test_array_child_warns() {
        let child = Value::Array(vec![]);
        let (_, sink) = run(&ObjectStrategy, "methods", None, Some(&child), None);
        assert_eq!(sink.len(), 1);
    }
}
