use std::sync::{PoisonError, RwLock};

/// Explicit session context: the bearer token plus the deployment API key.
///
/// Replaces the dashboard's browser-session-storage global. The token is
/// behind a lock so one session can be shared across clients and refreshed by
/// the auth layer without rebuilding them.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
    api_key: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(None),
            api_key: Some(api_key.into()),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn clear(&self) {
        self.set_token(None);
    }
}
