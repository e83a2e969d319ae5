//! Live instance context.
//!
//! Merging with an instance means the options are being resolved for a unit
//! that is already being constructed, rather than for a reusable type
//! definition. Several strategies change behavior on that distinction.

use crate::value::{Object, Value};

#[derive(Debug, Clone, Default)]
pub struct Instance {
    uid: u64,
    name: Option<String>,
    state: Object,
}

impl Instance {
    pub fn new(uid: u64) -> Self {
        Self {
            uid,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Seed a readable field, e.g. a resolved prop that data producers use.
    pub fn with_state(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state.insert(key.into(), value.into());
        self
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn state(&self) -> &Object {
        &self.state
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }
}
