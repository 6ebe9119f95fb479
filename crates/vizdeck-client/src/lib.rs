#![forbid(unsafe_code)]

//! Async REST client for the vizdeck graphics backend.
//!
//! The dashboard this replaces kept its bearer token in browser session
//! storage and its 401 handler in a module-level listener. Here both are
//! explicit: a [`Session`] passed to the client constructor and an injectable
//! [`AuthErrorListener`]. The backend surface is a trait ([`GraphicsApi`])
//! with an HTTP implementation and an in-memory one for tests and local
//! tooling.

mod envelope;
mod error;
mod http;
mod memory;
mod session;

pub use error::{Error, Result};
pub use http::{AuthErrorListener, HttpClient};
pub use memory::MemoryClient;
pub use session::Session;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vizdeck_core::{Feedback, GraphicRecord, GraphicTypeRecord, Role, User};

/// Payload for provisioning a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub password: String,
    pub group: Role,
    pub user_attributes: IndexMap<String, String>,
}

/// The backend surface the dashboard talks to.
///
/// Update bodies are open JSON objects (the backend PATCHes whatever slots
/// they carry); build them with `vizdeck_core::update_from_code` or by hand.
#[async_trait]
pub trait GraphicsApi: Send + Sync {
    async fn graphics(&self, graphic_type_id: &str) -> Result<Vec<GraphicRecord>>;
    async fn graphic(&self, graphic_id: &str) -> Result<GraphicRecord>;
    async fn create_graphic(&self, graphic: &GraphicRecord) -> Result<()>;
    async fn update_graphic(&self, graphic_id: &str, body: &Value) -> Result<()>;
    async fn delete_graphic(&self, graphic_id: &str) -> Result<()>;
    async fn duplicate_graphic(
        &self,
        source_graphic_id: &str,
        new_graphic_id: &str,
        new_graphic_name: &str,
    ) -> Result<()>;

    async fn graphic_types(&self) -> Result<Vec<GraphicTypeRecord>>;
    async fn graphic_type(&self, graphic_type_id: &str) -> Result<GraphicTypeRecord>;
    async fn save_graphic_type(
        &self,
        graphic_type_id: &str,
        graphic_type_name: Option<&str>,
    ) -> Result<()>;
    async fn update_graphic_type(&self, graphic_type_id: &str, body: &Value) -> Result<()>;
    async fn delete_graphic_type(&self, graphic_type_id: &str) -> Result<()>;

    async fn users(&self) -> Result<Vec<User>>;
    async fn add_user(&self, request: &NewUser) -> Result<()>;
    async fn update_user(&self, updates: &Value) -> Result<()>;
    async fn delete_user(&self, email: &str) -> Result<()>;

    async fn feedback(&self) -> Result<Vec<Feedback>>;
    async fn post_feedback(&self, feedback: &Feedback) -> Result<()>;
    async fn delete_feedback(&self, feedback_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests;
