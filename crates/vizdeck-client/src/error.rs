pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Not found: {resource}")]
    NotFound { resource: String },
}
