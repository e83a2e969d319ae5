//! Asset registries (components, directives, filters).
//!
//! The merged registry holds the child's entries locally and links to the
//! parent's registry as its ancestor, so inherited assets stay visible
//! without being copied.

use std::sync::Arc;

use super::{MergeContext, MergeStrategy};
use crate::linked::LinkedMap;
use crate::value::{present, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct AssetStrategy;

impl MergeStrategy for AssetStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        let mut registry = LinkedMap::new(present(parent).and_then(Value::to_ancestor));
        if let Some(child) = present(child) {
            cx.assert_object_type(child);
            for (name, asset) in child.entries().unwrap_or_default() {
                registry.insert(name, asset);
            }
        }
        Some(Value::Linked(Arc::new(registry)))
    }
}
