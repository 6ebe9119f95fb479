//! Query-string codec for config values.
//!
//! The embed runtime reads its parameters from the page URL, so booleans and
//! numbers travel as their literal string forms (`"true"`, `"42"`) and are
//! coerced back to native scalars on parse. Encoding is standard
//! `application/x-www-form-urlencoded`; list values become repeated keys.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Number;
use url::form_urlencoded;

use super::{ConfigValue, Scalar};

/// Decodes a raw query string (with or without a leading `?`) into ordered
/// key/value pairs. Repeated keys fold into a list in order of appearance.
pub fn parse_query(query: &str) -> IndexMap<String, ConfigValue> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut pairs: IndexMap<String, ConfigValue> = IndexMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let scalar = coerce_scalar(&value);
        match pairs.entry(key.into_owned()) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                match slot {
                    ConfigValue::List(items) => items.push(scalar),
                    ConfigValue::Scalar(first) => {
                        let first = first.clone();
                        *slot = ConfigValue::List(vec![first, scalar]);
                    }
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(ConfigValue::Scalar(scalar));
            }
        }
    }
    pairs
}

/// Encodes key/value pairs as a query string with keys sorted, so equal
/// configs always produce the same bytes.
pub fn write_query(pairs: &IndexMap<String, ConfigValue>) -> String {
    let mut entries: Vec<(&String, &ConfigValue)> = pairs.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in entries {
        match value {
            ConfigValue::Scalar(scalar) => {
                serializer.append_pair(key, &scalar.as_query_literal());
            }
            ConfigValue::List(items) => {
                for item in items {
                    serializer.append_pair(key, &item.as_query_literal());
                }
            }
        }
    }
    serializer.finish()
}

fn coerce_scalar(raw: &str) -> Scalar {
    match raw {
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }
    if !raw.is_empty() && raw.trim() == raw {
        if let Ok(int) = raw.parse::<i64>() {
            return Scalar::Number(Number::from(int));
        }
        if let Ok(float) = raw.parse::<f64>() {
            if float.is_finite() {
                if let Some(number) = Number::from_f64(float) {
                    return Scalar::Number(number);
                }
            }
        }
    }
    Scalar::String(raw.to_string())
}
