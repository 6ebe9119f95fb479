//! Deployment endpoints and the URL shapes the backend serves.

use url::Url;

use crate::error::{Error, Result};
use crate::screen::Tier;

pub const API_URL_VAR: &str = "VIZDECK_API_URL";
pub const ASSETS_URL_VAR: &str = "VIZDECK_ASSETS_URL";
pub const API_KEY_VAR: &str = "VIZDECK_API_KEY";

/// Where a deployment lives: the REST API and the CDN serving graphic
/// bundles. Base URLs are expected to end with `/`.
#[derive(Debug, Clone)]
pub struct Environment {
    api_base_url: Url,
    assets_base_url: Url,
    api_key: Option<String>,
}

impl Environment {
    pub fn new(api_base_url: &str, assets_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: Url::parse(api_base_url)?,
            assets_base_url: Url::parse(assets_base_url)?,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Reads `VIZDECK_API_URL`, `VIZDECK_ASSETS_URL` and (optionally)
    /// `VIZDECK_API_KEY` from the process environment.
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            std::env::var(API_URL_VAR).map_err(|_| Error::MissingEnvVar { name: API_URL_VAR })?;
        let assets_base_url = std::env::var(ASSETS_URL_VAR)
            .map_err(|_| Error::MissingEnvVar { name: ASSETS_URL_VAR })?;
        let mut environment = Self::new(&api_base_url, &assets_base_url)?;
        environment.api_key = std::env::var(API_KEY_VAR).ok();
        Ok(environment)
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn assets_base_url(&self) -> &Url {
        &self.assets_base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Embed URL for a graphic version, parameterized by an effective-config
    /// query string (see `config_to_query`).
    pub fn graphic_url(&self, graphic_id: &str, query: &str) -> String {
        format!("{}graphicVersion/load/{graphic_id}?{query}", self.api_base_url)
    }

    /// The graphic type's bundle on the CDN.
    pub fn bundle_url(&self, graphic_type_id: &str) -> String {
        format!("{}{graphic_type_id}/bundle.js", self.assets_base_url)
    }

    /// The data endpoint for a graphic version. The test tier also requests
    /// test descriptors.
    pub fn data_url(&self, graphic_id: &str, tier: Tier) -> String {
        let url = format!(
            "{}graphicVersions/data?graphicVersionId={graphic_id}",
            self.api_base_url
        );
        match tier {
            Tier::Test => url + "&data=test&descriptors=test",
            _ => url,
        }
    }
}
