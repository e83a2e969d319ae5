//! Component types and component-name checks.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, WarnSink};
use crate::instance::Instance;
use crate::tags::ReservedTags;
use crate::value::{Options, Value};

static COMPONENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][\w-]*$").expect("valid regex"));

/// A constructible component type: a name plus its resolved options.
///
/// When a component type shows up where plain options are expected (a merge
/// child, an `extends` source, a mixin), its options are used instead.
#[derive(Debug, Clone)]
pub struct ComponentType {
    name: Option<String>,
    options: Options,
    base: Option<Arc<ComponentType>>,
    merged: bool,
}

impl ComponentType {
    /// Take the name from the `name` option, if it is a string.
    pub fn new(options: Options) -> Self {
        let name = options
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            name,
            options,
            base: None,
            merged: false,
        }
    }

    pub fn named(name: impl Into<String>, options: Options) -> Self {
        Self {
            name: Some(name.into()),
            options,
            base: None,
            merged: false,
        }
    }

    /// Mark as derived from `base`. The options are already a merge result.
    pub(crate) fn with_base(mut self, base: Arc<ComponentType>) -> Self {
        self.base = Some(base);
        self.merged = true;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the options came out of a merge, with `extends`/`mixins`
    /// already folded in.
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// The type this one was extended from.
    pub fn base(&self) -> Option<&Arc<ComponentType>> {
        self.base.as_ref()
    }
}

/// Warn about a component name that is malformed or shadows an element.
/// Returns whether the name passed both checks.
pub fn validate_component_name(
    name: &str,
    tags: &ReservedTags,
    sink: &dyn WarnSink,
    vm: Option<&Instance>,
) -> bool {
    let mut valid = true;
    if !COMPONENT_NAME.is_match(name) {
        sink.warn(
            &Diagnostic::InvalidComponentName {
                name: name.to_string(),
            },
            vm,
        );
        valid = false;
    }
    if tags.is_taken(name) {
        sink.warn(
            &Diagnostic::ReservedComponentName {
                name: name.to_string(),
            },
            vm,
        );
        valid = false;
    }
    valid
}

/// Check every name declared under `components`.
pub fn check_components(
    options: &Options,
    tags: &ReservedTags,
    sink: &dyn WarnSink,
    vm: Option<&Instance>,
) {
    let Some(components) = options.get("components").and_then(Value::entries) else {
        return;
    };
    for name in components.keys() {
        validate_component_name(name, tags, sink, vm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use serde_json::json;

    #[test]
    fn test_valid_names() {
        let sink = CollectingSink::new();
        let tags = ReservedTags::web();
        for name in ["my-comp", "MyComp", "x1", "a_b"] {
            assert!(validate_component_name(name, &tags, &sink, None), "{name}");
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_malformed_name() {
        let sink = CollectingSink::new();
        assert!(!validate_component_name("1abc", &ReservedTags::web(), &sink, None));
        assert!(!validate_component_name("my comp", &ReservedTags::web(), &sink, None));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.diagnostics()[0].code(), "INVALID_COMPONENT_NAME");
    }

    #[test]
    fn test_reserved_names() {
        let sink = CollectingSink::new();
        let tags = ReservedTags::web();
        assert!(!validate_component_name("slot", &tags, &sink, None));
        assert!(!validate_component_name("Component", &tags, &sink, None));
        assert!(!validate_component_name("button", &tags, &sink, None));
        assert!(sink
            .diagnostics()
            .iter()
            .all(|d| d.code() == "RESERVED_COMPONENT_NAME"));
    }

    #[test]
    fn test_check_components_walks_declared_names() {
        let sink = CollectingSink::new();
        let options = match Value::from_json(json!({
            "components": {"ok-one": {}, "div": {}, "-bad": {}}
        })) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        check_components(&options, &ReservedTags::web(), &sink, None);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_component_type_name_from_options() {
        let mut options = Options::new();
        options.insert("name".into(), Value::from("Card"));
        assert_eq!(ComponentType::new(options).name(), Some("Card"));
    }
}
