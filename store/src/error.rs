use common::{models::Coin, BoxError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to connect to InfluxDB: {0}")]
    ConnectError(#[source] BoxError),

    #[error("failed to create point for coin [{coin:?}]: {reason}")]
    PointConstructionError { coin: Box<Coin>, reason: String },

    #[error("failed to store batch for series: {0}")]
    WriteError(#[source] BoxError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StoreError> for common::Error {
    fn from(err: StoreError) -> Self {
        common::Error::DbError(err.to_string())
    }
}
