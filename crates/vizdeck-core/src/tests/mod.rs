mod query;
mod roles;

use crate::RawConfig;

pub(crate) fn raw(value: serde_json::Value) -> RawConfig {
    serde_json::from_value(value).unwrap()
}
