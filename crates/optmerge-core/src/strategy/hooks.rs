//! Lifecycle hooks: parent's callbacks always run before child's.

use super::{MergeContext, MergeStrategy};
use crate::value::{present, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct HookStrategy;

impl MergeStrategy for HookStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        _cx: &MergeContext<'_>,
    ) -> Option<Value> {
        let Some(child) = present(child) else {
            return parent.cloned();
        };
        let mut hooks = present(parent).map(Value::to_sequence).unwrap_or_default();
        hooks.extend(child.to_sequence());
        Some(Value::Array(hooks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::run;
    use crate::value::Function;

    fn hook(name: &str) -> Value {
        Value::Function(Function::noop(name))
    }

    #[test]
    fn test_parent_runs_first() {
        let a = hook("a");
        let b = hook("b");
        let parent = Value::Array(vec![a.clone()]);
        let (out, _) = run(&HookStrategy, "created", Some(&parent), Some(&b), None);
        assert_eq!(out, Some(Value::Array(vec![a, b])));
    }

    #[test]
    fn test_lone_function_becomes_sequence() {
        let b = hook("b");
        let (out, _) = run(&HookStrategy, "mounted", None, Some(&b), None);
        assert_eq!(out, Some(Value::Array(vec![b])));
    }

    #[test]
    fn test_absent_child_keeps_parent() {
        let parent = Value::Array(vec![hook("a")]);
        let (out, _) = run(&HookStrategy, "mounted", Some(&parent), None, None);
        assert_eq!(out, Some(parent));
    }
}
