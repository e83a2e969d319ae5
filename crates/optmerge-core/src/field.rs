//! Field identifiers used to dispatch merge strategies.

use std::fmt;

/// Lifecycle hook names, in the order they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    BeforeCreate,
    Created,
    BeforeMount,
    Mounted,
    BeforeUpdate,
    Updated,
    BeforeDestroy,
    Destroyed,
    Activated,
    Deactivated,
    ErrorCaptured,
}

impl LifecycleHook {
    pub const ALL: [LifecycleHook; 11] = [
        LifecycleHook::BeforeCreate,
        LifecycleHook::Created,
        LifecycleHook::BeforeMount,
        LifecycleHook::Mounted,
        LifecycleHook::BeforeUpdate,
        LifecycleHook::Updated,
        LifecycleHook::BeforeDestroy,
        LifecycleHook::Destroyed,
        LifecycleHook::Activated,
        LifecycleHook::Deactivated,
        LifecycleHook::ErrorCaptured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleHook::BeforeCreate => "beforeCreate",
            LifecycleHook::Created => "created",
            LifecycleHook::BeforeMount => "beforeMount",
            LifecycleHook::Mounted => "mounted",
            LifecycleHook::BeforeUpdate => "beforeUpdate",
            LifecycleHook::Updated => "updated",
            LifecycleHook::BeforeDestroy => "beforeDestroy",
            LifecycleHook::Destroyed => "destroyed",
            LifecycleHook::Activated => "activated",
            LifecycleHook::Deactivated => "deactivated",
            LifecycleHook::ErrorCaptured => "errorCaptured",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hook| hook.as_str() == name)
    }
}

/// Named asset categories. Each lives in the option field named by its
/// plural form (`component` -> `components`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Component,
    Directive,
    Filter,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Component, AssetKind::Directive, AssetKind::Filter];

    /// Singular category name, as used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Component => "component",
            AssetKind::Directive => "directive",
            AssetKind::Filter => "filter",
        }
    }

    /// The option field holding this registry.
    pub fn field_name(&self) -> &'static str {
        match self {
            AssetKind::Component => "components",
            AssetKind::Directive => "directives",
            AssetKind::Filter => "filters",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field_name() == field)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy dispatch key.
///
/// Recognized field names map to dedicated variants; everything else is
/// `Custom`. Build keys with [`FieldKey::parse`] (or `From<&str>`) so that a
/// recognized name never ends up as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    El,
    PropsData,
    Data,
    Provide,
    Watch,
    Props,
    Methods,
    Inject,
    Computed,
    Hook(LifecycleHook),
    Assets(AssetKind),
    Custom(String),
}

impl FieldKey {
    pub fn parse(name: &str) -> Self {
        match name {
            "el" => FieldKey::El,
            "propsData" => FieldKey::PropsData,
            "data" => FieldKey::Data,
            "provide" => FieldKey::Provide,
            "watch" => FieldKey::Watch,
            "props" => FieldKey::Props,
            "methods" => FieldKey::Methods,
            "inject" => FieldKey::Inject,
            "computed" => FieldKey::Computed,
            other => {
                if let Some(hook) = LifecycleHook::from_name(other) {
                    FieldKey::Hook(hook)
                } else if let Some(kind) = AssetKind::from_field(other) {
                    FieldKey::Assets(kind)
                } else {
                    FieldKey::Custom(other.to_string())
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKey::El => "el",
            FieldKey::PropsData => "propsData",
            FieldKey::Data => "data",
            FieldKey::Provide => "provide",
            FieldKey::Watch => "watch",
            FieldKey::Props => "props",
            FieldKey::Methods => "methods",
            FieldKey::Inject => "inject",
            FieldKey::Computed => "computed",
            FieldKey::Hook(hook) => hook.as_str(),
            FieldKey::Assets(kind) => kind.field_name(),
            FieldKey::Custom(name) => name,
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::parse(name)
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::parse(&name)
    }
}

impl From<LifecycleHook> for FieldKey {
    fn from(hook: LifecycleHook) -> Self {
        FieldKey::Hook(hook)
    }
}

impl From<AssetKind> for FieldKey {
    fn from(kind: AssetKind) -> Self {
        FieldKey::Assets(kind)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_fields() {
        assert_eq!(FieldKey::parse("data"), FieldKey::Data);
        assert_eq!(FieldKey::parse("mounted"), FieldKey::Hook(LifecycleHook::Mounted));
        assert_eq!(FieldKey::parse("filters"), FieldKey::Assets(AssetKind::Filter));
        assert_eq!(FieldKey::parse("filter"), FieldKey::Custom("filter".into()));
    }

    #[test]
    fn test_round_trip_names() {
        for hook in LifecycleHook::ALL {
            assert_eq!(FieldKey::parse(hook.as_str()).as_str(), hook.as_str());
        }
        for kind in AssetKind::ALL {
            assert_eq!(FieldKey::parse(kind.field_name()), FieldKey::Assets(kind));
        }
    }
}
