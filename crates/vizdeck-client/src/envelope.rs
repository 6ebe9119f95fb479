use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Every backend response has the same shape: `{ success, items?, error? }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl Envelope {
    pub fn into_items<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        if !self.success {
            return Err(Error::Api {
                message: error_message(self.error),
            });
        }
        Ok(serde_json::from_value(self.items.unwrap_or(Value::Null))?)
    }

    pub fn into_unit(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Api {
                message: error_message(self.error),
            })
        }
    }
}

fn error_message(error: Option<Value>) -> String {
    match error {
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => "unknown API error".to_string(),
    }
}
