//! Value model for option objects.
//!
//! Options are open-ended maps from field name to [`Value`]. Absence of a
//! field ("unset") is always `Option::None`; [`Value::Null`] is a real value
//! and overrides a parent under the default strategy.

use indexmap::IndexMap;
use serde_json::Number;
use std::fmt;
use std::sync::Arc;

use crate::component::ComponentType;
use crate::instance::Instance;
use crate::linked::LinkedMap;

/// Insertion-ordered map used for plain objects.
pub type Object = IndexMap<String, Value>;

/// An option object (one component definition or one merge result).
pub type Options = Object;

/// A dynamically shaped option value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Function(Function),
    /// Map with an ancestor chain (asset registries, inherited watchers).
    Linked(Arc<LinkedMap>),
    /// A constructible component type carrying its own options.
    Component(Arc<ComponentType>),
}

/// Error raised by a user supplied callable.
///
/// Merged producers hand these back to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallError {
    message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type Callable = dyn Fn(Option<&Instance>) -> Result<Value, CallError> + Send + Sync;

/// A shared callable value (hook, method, data producer, directive handler).
///
/// Equality is identity: two `Function`s are equal only when they share the
/// same underlying closure.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    builtin: bool,
    inner: Arc<Callable>,
}

impl Function {
    /// Wrap a closure. The closure receives the bound instance, if any.
    pub fn new<F>(name: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(Option<&Instance>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.as_ref()),
            builtin: false,
            inner: Arc::new(f),
        }
    }

    /// A function that returns `null` when called.
    pub fn noop(name: impl AsRef<str>) -> Self {
        Self::new(name, |_| Ok(Value::Null))
    }

    /// A zero-argument producer that always returns a clone of `value`.
    pub fn returning(name: impl AsRef<str>, value: Value) -> Self {
        Self::new(name, move |_| Ok(value.clone()))
    }

    /// A platform-provided function (not declared by the user).
    pub fn builtin(name: impl AsRef<str>) -> Self {
        Self {
            builtin: true,
            ..Self::noop(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Invoke the function with an optional bound instance.
    pub fn call(&self, vm: Option<&Instance>) -> Result<Value, CallError> {
        (self.inner)(vm)
    }

    pub fn ptr_eq(a: &Function, b: &Function) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Function::ptr_eq(self, other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.builtin {
            write!(f, "[native {}]", self.name)
        } else {
            write!(f, "[Function {}]", self.name)
        }
    }
}

impl Value {
    /// Runtime type name used in diagnostics (`Object`, `Array`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) | Value::Linked(_) => "Object",
            Value::Function(_) | Value::Component(_) => "Function",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Plain objects are bare maps, with or without an ancestor chain.
    pub fn is_plain_object(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Linked(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_linked(&self) -> Option<&Arc<LinkedMap>> {
        match self {
            Value::Linked(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key, following the ancestor chain for linked maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            Value::Linked(map) => map.get(key),
            _ => None,
        }
    }

    /// Every enumerable entry, own entries first then inherited ones.
    ///
    /// Returns `None` for values that are not object shaped.
    pub fn entries(&self) -> Option<Object> {
        match self {
            Value::Object(map) => Some(map.clone()),
            Value::Linked(map) => Some(map.flatten()),
            _ => None,
        }
    }

    /// Coerce to a sequence: arrays are cloned, anything else is wrapped.
    pub fn to_sequence(&self) -> Vec<Value> {
        match self {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        }
    }

    /// The ancestor a new linked map should delegate to when this value is
    /// the parent side of a merge.
    pub fn to_ancestor(&self) -> Option<Arc<LinkedMap>> {
        match self {
            Value::Linked(map) => Some(Arc::clone(map)),
            Value::Object(map) => Some(Arc::new(LinkedMap::root(map.clone()))),
            _ => None,
        }
    }

    /// Convert from JSON data. JSON carries no callables.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render for display. Callables become `"[Function name]"`, linked maps
    /// are flattened and component types render as their options.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => object_to_json(map),
            Value::Linked(map) => object_to_json(&map.flatten()),
            Value::Function(f) => serde_json::Value::String(format!("[Function {}]", f.name())),
            Value::Component(c) => {
                let mut rendered = serde_json::Map::new();
                if let Some(name) = c.name() {
                    rendered.insert("name".into(), serde_json::Value::String(name.to_string()));
                }
                rendered.insert("options".into(), object_to_json(c.options()));
                serde_json::Value::Object(rendered)
            }
        }
    }
}

/// Render an option object for display.
pub fn object_to_json(map: &Object) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

/// Filter out `null`: most specialized strategies treat it like a missing
/// field.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Linked(a), Value::Linked(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Component(a), Value::Component(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Object(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Function(func) => func.fmt(f),
            Value::Linked(map) => map.fmt(f),
            Value::Component(c) => write!(f, "[Component {}]", c.name().unwrap_or("anonymous")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<LinkedMap> for Value {
    fn from(map: LinkedMap) -> Self {
        Value::Linked(Arc::new(map))
    }
}

impl From<ComponentType> for Value {
    fn from(component: ComponentType) -> Self {
        Value::Component(Arc::new(component))
    }
}

impl From<Arc<ComponentType>> for Value {
    fn from(component: Arc<ComponentType>) -> Self {
        Value::Component(component)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

/// Build an [`Object`] from `(key, value)` pairs.
pub fn object<K, V, I>(entries: I) -> Object
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
