//! The configuration model for a graphic: named, typed parameters that control
//! how a visualization renders.
//!
//! Two layers exist on the wire. A *schema* config (`configDefault` on a
//! graphic type) is a map of full field descriptors. A *stored override*
//! (`configOnline` on a graphic version) may hold bare scalars or lists where
//! an editor saved just a value. [`RawField`] captures that wire shape; the
//! rest of the crate works on normalized [`ConfigField`]s only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

mod query;
mod resolve;

pub use query::{parse_query, write_query};
pub use resolve::{
    UnknownKeyPolicy, config_to_query, merge_config, overwrite_with_query, resolve_config,
};

/// One scalar parameter value, as it appears in stored configs and in query
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// The literal string form used in query strings (`true`, `42`, `hello`).
    pub fn as_query_literal(&self) -> String {
        match self {
            Scalar::Bool(flag) => flag.to_string(),
            Scalar::Number(number) => number.to_string(),
            Scalar::String(text) => text.clone(),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(Number::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// A field's value: a single scalar or an ordered list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl ConfigValue {
    pub fn is_list(&self) -> bool {
        matches!(self, ConfigValue::List(_))
    }
}

impl From<Scalar> for ConfigValue {
    fn from(value: Scalar) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Scalar(value.into())
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Scalar(value.into())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(value.into())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Scalar(value.into())
    }
}

impl From<Vec<Scalar>> for ConfigValue {
    fn from(items: Vec<Scalar>) -> Self {
        ConfigValue::List(items)
    }
}

/// Declared field kinds. When absent from a descriptor, the kind is inferred
/// from the runtime value (see [`ConfigField::effective_type`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    String,
    Number,
    Option,
    Array,
}

/// One entry of a closed choice set for `option`/`array` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOption {
    pub label: String,
    pub value: Scalar,
}

/// A full field descriptor: the value plus the metadata the editing form
/// needs. Only `value` is required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    pub value: ConfigValue,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ConfigOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl ConfigField {
    /// A descriptor carrying only a value, the shape a bare override
    /// normalizes to.
    pub fn bare(value: ConfigValue) -> Self {
        Self {
            value,
            field_type: None,
            options: None,
            hidden: None,
        }
    }

    /// Hidden fields stay in the effective config but are excluded from the
    /// editing form and (optionally) from embed query strings.
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// The declared type, or the one implied by the value's runtime shape.
    pub fn effective_type(&self) -> FieldType {
        if let Some(declared) = self.field_type {
            return declared;
        }
        match &self.value {
            ConfigValue::List(_) => FieldType::Array,
            ConfigValue::Scalar(Scalar::Bool(_)) => FieldType::Boolean,
            ConfigValue::Scalar(Scalar::Number(_)) => FieldType::Number,
            ConfigValue::Scalar(Scalar::String(_)) => FieldType::String,
        }
    }
}

/// A normalized config: field name → descriptor, insertion-ordered.
pub type Config = IndexMap<String, ConfigField>;

/// The wire shape of one stored field: either a full descriptor or a bare
/// value an editor saved without metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    // `Value` must be tried first: serde can deserialize a struct from a
    // sequence positionally, so `Descriptor` would otherwise swallow bare
    // list values like `["orange"]`.
    Value(ConfigValue),
    Descriptor(ConfigField),
}

impl RawField {
    /// Lifts a bare value into a metadata-less descriptor; descriptors pass
    /// through unchanged.
    pub fn normalize(&self) -> ConfigField {
        match self {
            RawField::Descriptor(field) => field.clone(),
            RawField::Value(value) => ConfigField::bare(value.clone()),
        }
    }
}

/// A config as read from storage, before normalization.
pub type RawConfig = IndexMap<String, RawField>;

/// Normalizes every field of a raw config. Key order is preserved.
pub fn normalize_config(raw: &RawConfig) -> Config {
    raw.iter()
        .map(|(key, field)| (key.clone(), field.normalize()))
        .collect()
}
