//! Two-level lookup map: local entries plus a shared ancestor.
//!
//! Asset registries are merged by linking the child registry to the parent
//! registry instead of copying it. Lookups check local entries first and then
//! delegate to the ancestor chain.

use std::fmt;
use std::sync::Arc;

use crate::value::{Object, Value};

#[derive(Clone, Default, PartialEq)]
pub struct LinkedMap {
    local: Object,
    parent: Option<Arc<LinkedMap>>,
}

impl LinkedMap {
    /// An empty map delegating to `parent`.
    pub fn new(parent: Option<Arc<LinkedMap>>) -> Self {
        Self {
            local: Object::new(),
            parent,
        }
    }

    /// A map with local entries and no ancestor.
    pub fn root(local: Object) -> Self {
        Self {
            local,
            parent: None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.local.insert(key.into(), value)
    }

    pub fn parent(&self) -> Option<&Arc<LinkedMap>> {
        self.parent.as_ref()
    }

    pub fn local(&self) -> &Object {
        &self.local
    }

    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.local.get(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.local.get(key) {
            Some(value) => Some(value),
            None => self.parent.as_deref().and_then(|p| p.get(key)),
        }
    }

    pub fn contains_own(&self, key: &str) -> bool {
        self.local.contains_key(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of maps in the chain, this one included.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_deref().map_or(0, LinkedMap::depth)
    }

    /// Collapse the chain into one object. Own keys come first, then
    /// inherited keys not shadowed by a nearer map.
    pub fn flatten(&self) -> Object {
        let mut out = self.local.clone();
        let mut next = self.parent.as_deref();
        while let Some(map) = next {
            for (key, value) in &map.local {
                if !out.contains_key(key) {
                    out.insert(key.clone(), value.clone());
                }
            }
            next = map.parent.as_deref();
        }
        out
    }
}

impl fmt::Debug for LinkedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedMap")
            .field("local", &self.local)
            .field("parent", &self.parent)
            .finish()
    }
}
