use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoodMapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Tone analysis error: {0}")]
    ToneError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<reqwest::Error> for MoodMapError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MoodMapError>;
