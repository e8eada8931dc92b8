//! Ordered key to string map produced by extraction.

use indexmap::IndexMap;
use serde::Serialize;

use crate::key::{Macro, MacroKey, ValidKey};

/// An insertion-ordered mapping from placeholder key to value.
///
/// Only valid keys are ever stored: [`put`](Self::put) and
/// [`put_if_absent`](Self::put_if_absent) accept anything convertible into a
/// [`MacroKey`] and silently skip invalid ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MacroStringMap {
    entries: IndexMap<ValidKey<Macro>, String>,
}

impl MacroStringMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns `false` if the key is invalid.
    pub fn put(&mut self, key: impl Into<MacroKey>, value: impl Into<String>) -> bool {
        match key.into().into_valid() {
            Ok(key) => {
                self.entries.insert(key, value.into());
                true
            }
            Err(invalid) => {
                tracing::trace!("Skipping {invalid}");
                false
            }
        }
    }

    /// Insert only if no value is present. Returns `true` if the value was stored.
    pub fn put_if_absent(&mut self, key: impl Into<MacroKey>, value: impl Into<String>) -> bool {
        match key.into().into_valid() {
            Ok(key) => {
                if self.entries.contains_key(&key) {
                    return false;
                }
                self.entries.insert(key, value.into());
                true
            }
            Err(invalid) => {
                tracing::trace!("Skipping {invalid}");
                false
            }
        }
    }

    /// Look up by dotted path.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Merge `other` into `self`, keeping existing values on collision.
    pub fn extend_if_absent(&mut self, other: MacroStringMap) {
        for (key, value) in other.entries {
            self.entries.entry(key).or_insert(value);
        }
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ValidKey<Macro>, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ValidKey<Macro>> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
