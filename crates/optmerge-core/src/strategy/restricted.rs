//! Fields only meaningful at instance creation (`el`, `propsData`).

use super::{DefaultStrategy, MergeContext, MergeStrategy};
use crate::diagnostics::Diagnostic;
use crate::value::Value;

/// Warns when merged without an instance, then behaves like the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictedStrategy;

impl MergeStrategy for RestrictedStrategy {
    fn merge(
        &self,
        parent: Option<&Value>,
        child: Option<&Value>,
        cx: &MergeContext<'_>,
    ) -> Option<Value> {
        if cx.vm().is_none() {
            cx.warn(Diagnostic::RestrictedOption {
                option: cx.key().to_string(),
            });
        }
        DefaultStrategy::apply(parent, child)
    }
}
