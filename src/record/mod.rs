//! Loosely-typed ROI records, as produced by the ImageJ decoder.
//!
//! A record is a JSON-like mapping whose fields depend on the ROI kind, so
//! it is kept as a [`serde_json::Map`] and read through the typed accessors
//! below. Accessors report a [`RoiError::MalformedRecord`] naming the field
//! when it is missing or has the wrong type; nothing is repaired.

pub mod io_json;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RoiError;

/// A single ROI record: field name to value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoiRecord(Map<String, Value>);

impl RoiRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The declared kind tag (`type`), if it is a string.
    pub fn kind_tag(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The ROI label (`name`), if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Reads a required numeric field.
    pub fn require_f64(&self, field: &str) -> Result<f64, RoiError> {
        let value = self.0.get(field).ok_or_else(|| RoiError::missing(field))?;
        value
            .as_f64()
            .ok_or_else(|| RoiError::malformed(field, format!("expected a number, got {value}")))
    }

    /// Reads a required sequence of numbers.
    pub fn require_f64_seq(&self, field: &str) -> Result<Vec<f64>, RoiError> {
        let value = self.0.get(field).ok_or_else(|| RoiError::missing(field))?;
        let items = value.as_array().ok_or_else(|| {
            RoiError::malformed(field, format!("expected a sequence, got {value}"))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_f64().ok_or_else(|| {
                    RoiError::malformed(field, format!("item {i} is not a number: {item}"))
                })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for RoiRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// An ordered mapping from record name to [`RoiRecord`].
///
/// Iteration follows insertion order. Inserting an existing name replaces
/// its record in place, so the name keeps its original position.
#[derive(Clone, Debug, Default)]
pub struct RecordSet {
    entries: IndexMap<String, RoiRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, record: RoiRecord) -> Option<RoiRecord> {
        self.entries.insert(name.into(), record)
    }

    pub fn get(&self, name: &str) -> Option<&RoiRecord> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoiRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Iterates over records only, in order.
    pub fn records(&self) -> impl Iterator<Item = &RoiRecord> {
        self.entries.values()
    }
}

/// Two sets are equal when they hold the same names in the same order.
impl PartialEq for RecordSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>> FromIterator<(K, RoiRecord)> for RecordSet {
    fn from_iter<I: IntoIterator<Item = (K, RoiRecord)>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for (name, record) in iter {
            set.insert(name, record);
        }
        set
    }
}

impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in self.iter() {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(name, value)| match value {
                Value::Object(fields) => Ok((name, RoiRecord::from(fields))),
                other => Err(de::Error::custom(format!(
                    "record '{name}' must be an object, got {other}"
                ))),
            })
            .collect()
    }
}
