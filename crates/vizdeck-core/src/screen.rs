//! Editor screens and storage tiers.
//!
//! Each dashboard screen edits one slot of the graphic document, and each
//! slot exists at up to three tiers: the version's working copy (`test`), the
//! published copy (`online`) and the type-level default. Notes have no tiers
//! and the config editor's working copy is the online slot itself; both quirks
//! come from the backend schema.

use std::str::FromStr;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::graphic::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Data,
    Notes,
    Css,
    Descriptors,
    ConfigEditor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Test,
    Online,
    Default,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Data => "data",
            Screen::Notes => "note",
            Screen::Css => "css-v0",
            Screen::Descriptors => "descriptors",
            Screen::ConfigEditor => "config-editor",
        }
    }

    /// The document key holding this screen's content at a tier, or `None`
    /// where the tier does not exist (notes have no default).
    pub fn code_key(self, tier: Tier) -> Option<&'static str> {
        match (self, tier) {
            (Screen::Data, Tier::Test) => Some("dataTest"),
            (Screen::Data, Tier::Online) => Some("dataOnline"),
            (Screen::Data, Tier::Default) => Some("dataDefault"),
            (Screen::Notes, Tier::Default) => None,
            (Screen::Notes, _) => Some("notes"),
            (Screen::Css, Tier::Test) => Some("css0Test"),
            (Screen::Css, Tier::Online) => Some("css0Online"),
            (Screen::Css, Tier::Default) => Some("cssDefault"),
            (Screen::Descriptors, Tier::Test) => Some("descriptorsTest"),
            (Screen::Descriptors, Tier::Online) => Some("descriptorsOnline"),
            (Screen::Descriptors, Tier::Default) => Some("descriptorsDefault"),
            (Screen::ConfigEditor, Tier::Default) => Some("configDefault"),
            (Screen::ConfigEditor, _) => Some("configOnline"),
        }
    }

    pub fn last_update_key(self, tier: Tier) -> Option<String> {
        self.code_key(tier).map(|key| format!("{key}LastUpdate"))
    }

    pub fn last_saved_by_key(self, tier: Tier) -> Option<String> {
        self.code_key(tier).map(|key| format!("{key}LastSavedBy"))
    }

    fn is_json(self) -> bool {
        matches!(self, Screen::Data | Screen::Descriptors | Screen::ConfigEditor)
    }
}

impl FromStr for Screen {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "data" => Ok(Screen::Data),
            "note" => Ok(Screen::Notes),
            "css-v0" => Ok(Screen::Css),
            "descriptors" => Ok(Screen::Descriptors),
            "config-editor" => Ok(Screen::ConfigEditor),
            other => Err(Error::UnknownScreen(other.to_string())),
        }
    }
}

/// The editor text for a screen's slot at a tier. JSON-backed screens render
/// with the dashboard's 4-space indentation; text screens pass through.
/// Missing, null and empty slots yield the empty string.
pub fn code_from_record(record: &Record, screen: Screen, tier: Tier) -> String {
    let Some(key) = screen.code_key(tier) else {
        return String::new();
    };
    let Some(value) = record.get_value(key) else {
        return String::new();
    };
    let valid = match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        // 0 is a legitimate slot value even though it is falsy in the browser
        Value::Number(_) => true,
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    if !valid {
        return String::new();
    }
    if screen.is_json() {
        return pretty_json(value);
    }
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

/// Builds the PATCH body that saves editor text back to the screen's working
/// slot. JSON screens parse the text first; an empty editor clears the slot.
pub fn update_from_code(code: &str, screen: Screen) -> Result<Value> {
    let Some(key) = screen.code_key(Tier::Test) else {
        return Ok(Value::Object(Map::new()));
    };
    let value = if !screen.is_json() {
        Value::String(code.to_string())
    } else if code.is_empty() {
        Value::String(String::new())
    } else {
        serde_json::from_str(code).map_err(|source| Error::InvalidCode {
            screen: screen.as_str(),
            source,
        })?
    };
    let mut body = Map::new();
    body.insert(key.to_string(), value);
    Ok(Value::Object(body))
}

fn pretty_json(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}
