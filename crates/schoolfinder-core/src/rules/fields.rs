//! Loosely-typed request fields awaiting validation
//!
//! JSON bodies, form bodies and query strings all flatten into a [`FieldMap`]
//! so that validation runs the same way regardless of how the client sent
//! the data.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Where in the request a field was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
}

/// Field name to raw value, tagged with where the value came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: BTreeMap<String, (Value, Location)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, I>(pairs: I, location: Location) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map = Self::new();
        for (name, value) in pairs {
            map.insert(name, value, location);
        }
        map
    }

    /// Flatten a decoded JSON object; nested values are kept as-is and later
    /// fail validation.
    pub fn from_json_object(object: Map<String, Value>, location: Location) -> Self {
        Self::from_pairs(object, location)
    }

    /// Build from decoded `key=value` pairs. The first occurrence of a
    /// repeated key wins.
    pub fn from_string_pairs<I>(pairs: I, location: Location) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = Self::new();
        for (name, value) in pairs {
            map.fields
                .entry(name)
                .or_insert((Value::String(value), location));
        }
        map
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value, location: Location) {
        self.fields.insert(name.into(), (value, location));
    }

    /// Copy in fields from `other` that are not already present
    pub fn merge_missing(&mut self, other: FieldMap) {
        for (name, entry) in other.fields {
            self.fields.entry(name).or_insert(entry);
        }
    }

    pub fn get(&self, name: &str) -> Option<(&Value, Location)> {
        self.fields.get(name).map(|(value, location)| (value, *location))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
