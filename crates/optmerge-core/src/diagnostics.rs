//! Advisory diagnostics and the sinks that receive them.
//!
//! Nothing in the merge path fails: malformed shapes, name collisions and
//! misused fields are reported here and then degraded gracefully.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::instance::Instance;

/// Machine-readable advisory condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[serde(tag = "type", content = "detail")]
pub enum Diagnostic {
    /// Field value should have been an object.
    #[serde(rename = "INVALID_OBJECT_TYPE")]
    #[error("Invalid value for option \"{option}\": expected an Object, but got {got}.")]
    InvalidObjectType { option: String, got: String },

    /// Field value should have been an array or an object.
    #[serde(rename = "INVALID_ARRAY_OR_OBJECT")]
    #[error("Invalid value for option \"{option}\": expected an Array or an Object, but got {got}.")]
    InvalidArrayOrObject { option: String, got: String },

    /// Array shorthand contained a non-string entry.
    #[serde(rename = "ARRAY_OF_STRINGS")]
    #[error("{option} must be strings when using array syntax.")]
    ArrayOfStrings { option: String },

    /// `data` given as a plain value on a type definition.
    #[serde(rename = "DATA_NOT_FUNCTION")]
    #[error("The \"data\" option should be a function that returns a per-instance value in component definitions.")]
    DataNotFunction,

    /// Field only meaningful when merging for a live instance.
    #[serde(rename = "RESTRICTED_OPTION")]
    #[error("option \"{option}\" can only be used during instance creation with the `new` keyword.")]
    RestrictedOption { option: String },

    #[serde(rename = "INVALID_COMPONENT_NAME")]
    #[error("Invalid component name: \"{name}\". Component names can only contain alphanumeric characters and the hyphen, and must start with a letter.")]
    InvalidComponentName { name: String },

    #[serde(rename = "RESERVED_COMPONENT_NAME")]
    #[error("Do not use built-in or reserved HTML elements as component id: {name}")]
    ReservedComponentName { name: String },

    #[serde(rename = "UNRESOLVED_ASSET")]
    #[error("Failed to resolve {kind}: {id}")]
    UnresolvedAsset { kind: String, id: String },
}

impl Diagnostic {
    /// Stable machine code.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::InvalidObjectType { .. } => "INVALID_OBJECT_TYPE",
            Diagnostic::InvalidArrayOrObject { .. } => "INVALID_ARRAY_OR_OBJECT",
            Diagnostic::ArrayOfStrings { .. } => "ARRAY_OF_STRINGS",
            Diagnostic::DataNotFunction => "DATA_NOT_FUNCTION",
            Diagnostic::RestrictedOption { .. } => "RESTRICTED_OPTION",
            Diagnostic::InvalidComponentName { .. } => "INVALID_COMPONENT_NAME",
            Diagnostic::ReservedComponentName { .. } => "RESERVED_COMPONENT_NAME",
            Diagnostic::UnresolvedAsset { .. } => "UNRESOLVED_ASSET",
        }
    }
}

/// Receiver for advisory diagnostics. Fire-and-forget.
pub trait WarnSink: Send + Sync {
    fn warn(&self, diagnostic: &Diagnostic, vm: Option<&Instance>);
}

/// Emits each diagnostic as a `tracing` warning event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarnSink for TracingSink {
    fn warn(&self, diagnostic: &Diagnostic, vm: Option<&Instance>) {
        match vm {
            Some(vm) => tracing::warn!(
                code = diagnostic.code(),
                instance = vm.uid(),
                component = vm.name().unwrap_or("anonymous"),
                "{diagnostic}"
            ),
            None => tracing::warn!(code = diagnostic.code(), "{diagnostic}"),
        }
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl WarnSink for SilentSink {
    fn warn(&self, _diagnostic: &Diagnostic, _vm: Option<&Instance>) {}
}

/// One recorded diagnostic.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Warning {
    #[serde(flatten)]
    pub diagnostic: Diagnostic,

    pub message: String,

    /// Uid of the instance the merge ran for, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<u64>,
}

/// Records diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<Warning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.lock().clone()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().iter().map(|w| w.diagnostic.clone()).collect()
    }

    /// Drain the recorded warnings.
    pub fn take(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Warning>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WarnSink for CollectingSink {
    fn warn(&self, diagnostic: &Diagnostic, vm: Option<&Instance>) {
        self.lock().push(Warning {
            diagnostic: diagnostic.clone(),
            message: diagnostic.to_string(),
            instance: vm.map(Instance::uid),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let d = Diagnostic::InvalidObjectType {
            option: "methods".into(),
            got: "Array".into(),
        };
        assert_eq!(
            d.to_string(),
            "Invalid value for option \"methods\": expected an Object, but got Array."
        );
        assert_eq!(d.code(), "INVALID_OBJECT_TYPE");

        let d = Diagnostic::UnresolvedAsset {
            kind: "component".into(),
            id: "my-comp".into(),
        };
        assert_eq!(d.to_string(), "Failed to resolve component: my-comp");
    }

    #[test]
    fn test_collecting_sink_records_instance() {
        let sink = CollectingSink::new();
        let vm = Instance::new(7);
        sink.warn(&Diagnostic::DataNotFunction, Some(&vm));
        sink.warn(&Diagnostic::DataNotFunction, None);

        let warnings = sink.take();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].instance, Some(7));
        assert_eq!(warnings[1].instance, None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let d = Diagnostic::RestrictedOption { option: "el".into() };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "RESTRICTED_OPTION");
        assert_eq!(json["detail"]["option"], "el");
    }
}
