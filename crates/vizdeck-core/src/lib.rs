#![forbid(unsafe_code)]

//! Headless core for the vizdeck graphics dashboard.
//!
//! Design goals:
//! - deterministic config resolution (type defaults → version overrides → URL query)
//! - typed wire shapes with explicit normalization at the data-model boundary
//! - no I/O: callers bring persistence, auth and rendering

pub mod config;
pub mod error;
pub mod feedback;
pub mod graphic;
pub mod last_saved;
pub mod preview;
pub mod screen;
pub mod urls;
pub mod users;

pub use config::{
    Config, ConfigField, ConfigOption, ConfigValue, FieldType, RawConfig, RawField, Scalar,
    UnknownKeyPolicy, config_to_query, merge_config, normalize_config, overwrite_with_query,
    parse_query, resolve_config, write_query,
};
pub use error::{Error, Result};
pub use feedback::Feedback;
pub use graphic::{GraphicRecord, GraphicTypeRecord, Record};
pub use last_saved::{last_update_text, relative_time};
pub use preview::preview_html;
pub use screen::{Screen, Tier, code_from_record, update_from_code};
pub use urls::Environment;
pub use users::{Role, User, UserAttribute, role_allows};

#[cfg(test)]
mod tests;
