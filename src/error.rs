use thiserror::Error;

#[derive(Error, Debug)]
pub enum GerritError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed, please check username and password")]
    Authentication,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API request failed: {status} {message}")]
    Api { status: u16, message: String },

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Invalid comment location '{0}', expected 'line', 'start-end', or 'LnCm-LnCm'")]
    InvalidLocation(String),

    #[error("Invalid inline comment '{0}', expected 'file#location'")]
    MissingFileSeparator(String),

    #[error("Unknown part '{part}'. Available parts: {available}")]
    InvalidParts { part: String, available: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GerritError>;
