//! Setter used when data merging introduces a key.
//!
//! The engine never assigns a new key into merged data directly; it goes
//! through a [`ReactiveSetter`] so a host can make the key observable.

use crate::value::{Object, Value};

pub trait ReactiveSetter: Send + Sync {
    fn set(&self, target: &mut Object, key: &str, value: Value);
}

/// Plain insertion, for hosts without change tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSetter;

impl ReactiveSetter for PlainSetter {
    fn set(&self, target: &mut Object, key: &str, value: Value) {
        target.insert(key.to_string(), value);
    }
}
