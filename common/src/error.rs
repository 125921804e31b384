use thiserror::Error;

/// Boxed cause carried by transport and read failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to retrieve response from ticker: {0}")]
    TransportError(#[source] BoxError),

    #[error("failed to retrieve successful response, got status [{status}, {status_text}]")]
    UnsuccessfulResponseError { status: u16, status_text: String },

    #[error("failed to read response from ticker: {0}")]
    ReadError(#[source] BoxError),

    #[error("failed to decode response from ticker: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DbError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
