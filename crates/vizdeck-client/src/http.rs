use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;
use vizdeck_core::{Feedback, GraphicRecord, GraphicTypeRecord, User};

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::{GraphicsApi, NewUser};

/// Invoked whenever the backend answers 401, so the embedding application can
/// drop to its sign-in flow. The client itself owns no auth state beyond the
/// [`Session`] it was given.
pub type AuthErrorListener = Arc<dyn Fn(&Error) + Send + Sync>;

/// HTTP implementation of [`GraphicsApi`].
///
/// `base_url` must end with `/` (endpoints are joined onto it). Every request
/// carries the session's API key and, when present, its bearer token.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
    on_auth_error: Option<AuthErrorListener>,
}

impl HttpClient {
    pub fn new(base_url: Url, session: Arc<Session>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
            on_auth_error: None,
        }
    }

    pub fn with_auth_error_listener(mut self, listener: AuthErrorListener) -> Self {
        self.on_auth_error = Some(listener);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope> {
        let mut request = request.header("Content-Type", "application/json");
        if let Some(api_key) = self.session.api_key() {
            request = request.header("x-api-key", api_key);
        }
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        debug!(status = %response.status(), url = %response.url(), "api response");

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("api rejected credentials");
            let err = Error::Unauthorized;
            if let Some(listener) = &self.on_auth_error {
                listener(&err);
            }
            return Err(err);
        }

        Ok(response.json::<Envelope>().await?)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        self.send(self.http.get(url).query(query)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        self.send(self.http.post(url).json(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        debug!(%url, "PUT");
        self.send(self.http.put(url).json(body)).await
    }

    async fn patch(&self, path: &str, query: &[(&str, &str)], body: &Value) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        debug!(%url, "PATCH");
        self.send(self.http.patch(url).query(query).json(body)).await
    }

    async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        debug!(%url, "DELETE");
        self.send(self.http.delete(url).query(query)).await
    }
}

#[async_trait]
impl GraphicsApi for HttpClient {
    async fn graphics(&self, graphic_type_id: &str) -> Result<Vec<GraphicRecord>> {
        self.get("graphicVersions", &[("graphicTypeId", graphic_type_id)])
            .await?
            .into_items()
    }

    async fn graphic(&self, graphic_id: &str) -> Result<GraphicRecord> {
        self.get("graphicById", &[("graphicId", graphic_id)])
            .await?
            .into_items()
    }

    async fn create_graphic(&self, graphic: &GraphicRecord) -> Result<()> {
        self.post("graphicVersions", &serde_json::to_value(graphic)?)
            .await?
            .into_unit()
    }

    async fn update_graphic(&self, graphic_id: &str, body: &Value) -> Result<()> {
        self.patch("graphicVersions", &[("graphicId", graphic_id)], body)
            .await?
            .into_unit()
    }

    async fn delete_graphic(&self, graphic_id: &str) -> Result<()> {
        self.delete("graphicVersions", &[("graphicId", graphic_id)])
            .await?
            .into_unit()
    }

    async fn duplicate_graphic(
        &self,
        source_graphic_id: &str,
        new_graphic_id: &str,
        new_graphic_name: &str,
    ) -> Result<()> {
        let body = json!({
            "sourceGraphicId": source_graphic_id,
            "newGraphicId": new_graphic_id,
            "newGraphicName": new_graphic_name,
        });
        self.post("graphicVersions/copy", &body).await?.into_unit()
    }

    async fn graphic_types(&self) -> Result<Vec<GraphicTypeRecord>> {
        self.get("graphicTypes", &[]).await?.into_items()
    }

    async fn graphic_type(&self, graphic_type_id: &str) -> Result<GraphicTypeRecord> {
        self.get("graphicTypes", &[("graphicTypeId", graphic_type_id)])
            .await?
            .into_items()
    }

    async fn save_graphic_type(
        &self,
        graphic_type_id: &str,
        graphic_type_name: Option<&str>,
    ) -> Result<()> {
        let body = json!({
            "graphicTypeId": graphic_type_id,
            "graphicTypeName": graphic_type_name,
        });
        self.post("graphicTypes", &body).await?.into_unit()
    }

    async fn update_graphic_type(&self, graphic_type_id: &str, body: &Value) -> Result<()> {
        self.patch("graphicTypes", &[("graphicTypeId", graphic_type_id)], body)
            .await?
            .into_unit()
    }

    async fn delete_graphic_type(&self, graphic_type_id: &str) -> Result<()> {
        self.delete("graphicTypes", &[("graphicTypeId", graphic_type_id)])
            .await?
            .into_unit()
    }

    async fn users(&self) -> Result<Vec<User>> {
        // the backend answers `items: null` when no users exist
        Ok(self
            .get("users", &[])
            .await?
            .into_items::<Option<Vec<User>>>()?
            .unwrap_or_default())
    }

    async fn add_user(&self, request: &NewUser) -> Result<()> {
        self.post("users", &serde_json::to_value(request)?)
            .await?
            .into_unit()
    }

    async fn update_user(&self, updates: &Value) -> Result<()> {
        self.put("users", updates).await?.into_unit()
    }

    async fn delete_user(&self, email: &str) -> Result<()> {
        self.delete("users", &[("email", email)]).await?.into_unit()
    }

    async fn feedback(&self) -> Result<Vec<Feedback>> {
        self.get("feedback", &[]).await?.into_items()
    }

    async fn post_feedback(&self, feedback: &Feedback) -> Result<()> {
        self.post("feedback", &serde_json::to_value(feedback)?)
            .await?
            .into_unit()
    }

    async fn delete_feedback(&self, feedback_id: &str) -> Result<()> {
        self.delete("feedback", &[("feedbackId", feedback_id)])
            .await?
            .into_unit()
    }
}
