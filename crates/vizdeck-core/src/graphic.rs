//! Graphic documents as the backend stores them.
//!
//! A graphic (and a graphic type) is an open JSON object: a handful of
//! well-known slots (`graphicId`, `configOnline`, `dataTest`, …) plus
//! whatever the graphic bundle needs. [`Record`] wraps such a document with
//! dotted-path accessors; [`GraphicRecord`] and [`GraphicTypeRecord`] add the
//! typed accessors the dashboard relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::RawConfig;
use crate::error::{Error, Result};

/// An open JSON document with dotted-path access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Default for Record {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl Record {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get_value(&self, dotted_path: &str) -> Option<&Value> {
        let mut cursor = &self.0;
        for segment in dotted_path.split('.') {
            cursor = cursor.as_object()?.get(segment)?;
        }
        Some(cursor)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get_value(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get_value(dotted_path)?.as_bool()
    }

    /// Writes `value` at a dotted path, creating intermediate objects as
    /// needed. Non-object roots and intermediates are coerced to objects so
    /// this never panics on arbitrary documents.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cursor: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                cursor.insert(segment.to_string(), value);
                return;
            }
            let slot = cursor
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cursor = next;
        }
    }

    /// Merges `incoming` over this document: objects merge key-wise, any
    /// other pair replaces. Used to apply PATCH bodies locally.
    pub fn deep_merge(&mut self, incoming: &Value) {
        deep_merge_value(&mut self.0, incoming);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (key, incoming_value) in incoming_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, incoming_value),
                    None => {
                        base_map.insert(key.clone(), incoming_value.clone());
                    }
                }
            }
        }
        (base_slot, incoming_value) => {
            *base_slot = incoming_value.clone();
        }
    }
}

fn config_slot(record: &Record, slot: &'static str) -> Result<Option<RawConfig>> {
    match record.get_value(slot) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|source| Error::InvalidConfig { slot, source }),
    }
}

/// A graphic version: a concrete instance of a graphic type with its own
/// test/online data and config overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphicRecord(Record);

impl GraphicRecord {
    pub fn from_value(value: Value) -> Self {
        Self(Record::from_value(value))
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.0
    }

    pub fn graphic_id(&self) -> Option<&str> {
        self.0.get_str("graphicId")
    }

    pub fn graphic_name(&self) -> Option<&str> {
        self.0.get_str("graphicName")
    }

    pub fn graphic_type_id(&self) -> Option<&str> {
        self.0.get_str("graphicTypeId")
    }

    pub fn is_locked(&self) -> bool {
        self.0.get_bool("isLocked").unwrap_or(false)
    }

    pub fn is_favorite(&self) -> bool {
        self.0.get_bool("isFavorite").unwrap_or(false)
    }

    /// The version's stored config overrides, when present and well-formed.
    pub fn config_online(&self) -> Result<Option<RawConfig>> {
        config_slot(&self.0, "configOnline")
    }
}

/// A graphic type: the template owning default data, descriptors, CSS and the
/// config schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphicTypeRecord(Record);

impl GraphicTypeRecord {
    pub fn from_value(value: Value) -> Self {
        Self(Record::from_value(value))
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.0
    }

    pub fn graphic_type_id(&self) -> Option<&str> {
        self.0.get_str("graphicTypeId")
    }

    pub fn graphic_type_name(&self) -> Option<&str> {
        self.0.get_str("graphicTypeName")
    }

    pub fn css_default(&self) -> Option<&str> {
        self.0.get_str("cssDefault")
    }

    pub fn data_default(&self) -> Option<&Value> {
        self.0.get_value("dataDefault")
    }

    /// The type's config schema, when present and well-formed.
    pub fn config_default(&self) -> Result<Option<RawConfig>> {
        config_slot(&self.0, "configDefault")
    }
}
