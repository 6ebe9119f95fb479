//! The tiered config resolver.
//!
//! Three layers combine into one effective config, in strict precedence
//! order: URL query overrides > version overrides > type defaults. The only
//! correct composition is
//!
//! ```text
//! effective = overwrite_with_query(merge_config(default, version), query)
//! ```
//!
//! All operations are pure: inputs are never mutated and every call allocates
//! a fresh result. None of them can fail; malformed-but-representable shapes
//! degrade to passing the override through.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use super::query::{parse_query, write_query};
use super::{Config, ConfigField, ConfigValue, RawConfig, RawField};

/// How [`overwrite_with_query`] treats query keys absent from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Adopt the key as a bare `{value}` field. This is the historical
    /// dashboard behavior: a typo'd preview link grows a spurious field
    /// instead of being rejected.
    #[default]
    Adopt,
    /// Drop the key.
    Reject,
}

/// Deep-merges a version's stored overrides over the graphic type's schema,
/// keyed by field name.
///
/// - a bare scalar/list override replaces only the `value` slot, so
///   `type`/`options`/`hidden` survive from the schema
/// - lists replace wholesale, never element-wise
/// - descriptor-over-descriptor merges field-wise (override wins, absent
///   metadata is inherited)
/// - if the schema slot is not a descriptor there is nothing to merge
///   against and the override passes through untouched
/// - keys unique to either side are kept: schema keys first in schema order,
///   then version-only keys
pub fn merge_config(default: &RawConfig, version: &RawConfig) -> Config {
    let mut merged = Config::new();
    for (key, default_field) in default {
        let field = match (default_field, version.get(key)) {
            (_, None) => default_field.normalize(),
            (RawField::Descriptor(base), Some(RawField::Value(value))) => {
                let mut field = base.clone();
                field.value = value.clone();
                field
            }
            (RawField::Descriptor(base), Some(RawField::Descriptor(over))) => ConfigField {
                value: over.value.clone(),
                field_type: over.field_type.or(base.field_type),
                options: over.options.clone().or_else(|| base.options.clone()),
                hidden: over.hidden.or(base.hidden),
            },
            (RawField::Value(_), Some(over)) => over.normalize(),
        };
        merged.insert(key.clone(), field);
    }
    for (key, field) in version {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), field.normalize());
        }
    }
    merged
}

/// Projects a config down to `key=value` pairs (metadata dropped) and encodes
/// them as the query string that parameterizes the embed URL. With
/// `omit_hidden_fields`, fields marked hidden are left out.
pub fn config_to_query(config: &Config, omit_hidden_fields: bool) -> String {
    let values: IndexMap<String, ConfigValue> = config
        .iter()
        .filter(|(_, field)| !omit_hidden_fields || !field.is_hidden())
        .map(|(key, field)| (key.clone(), field.value.clone()))
        .collect();
    write_query(&values)
}

/// Applies ad-hoc URL overrides on top of an already-merged config.
///
/// Only the `value` slot of a matching field changes; `type`/`options`/
/// `hidden` are untouched. A single query scalar never downgrades a
/// list-valued field: it is wrapped in a one-element list instead. An empty
/// query returns the config unchanged.
pub fn overwrite_with_query(config: &Config, query: &str, policy: UnknownKeyPolicy) -> Config {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return config.clone();
    }

    let mut overwritten = config.clone();
    for (key, incoming) in parse_query(query) {
        match overwritten.entry(key) {
            Entry::Occupied(mut entry) => {
                let field = entry.get_mut();
                let value = match (&field.value, incoming) {
                    (ConfigValue::List(_), ConfigValue::Scalar(scalar)) => {
                        ConfigValue::List(vec![scalar])
                    }
                    (_, incoming) => incoming,
                };
                field.value = value;
            }
            Entry::Vacant(entry) => match policy {
                UnknownKeyPolicy::Adopt => {
                    warn!(key = %entry.key(), "query key not present in config; adopting");
                    entry.insert(ConfigField::bare(incoming));
                }
                UnknownKeyPolicy::Reject => {
                    warn!(key = %entry.key(), "query key not present in config; dropping");
                }
            },
        }
    }
    overwritten
}

/// Resolves the three layers in their one correct order.
pub fn resolve_config(
    default: &RawConfig,
    version: Option<&RawConfig>,
    query: Option<&str>,
    policy: UnknownKeyPolicy,
) -> Config {
    let empty = RawConfig::new();
    let merged = merge_config(default, version.unwrap_or(&empty));
    match query {
        Some(query) => overwrite_with_query(&merged, query, policy),
        None => merged,
    }
}
