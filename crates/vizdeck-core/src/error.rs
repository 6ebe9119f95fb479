pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {screen} code: {source}")]
    InvalidCode {
        screen: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {slot} config: {source}")]
    InvalidConfig {
        slot: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown screen: {0}")]
    UnknownScreen(String),
}
