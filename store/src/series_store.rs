use crate::backend::{BackendConnection, BatchPoints, Precision, SeriesBackend};
use crate::{InfluxBackend, SeriesStore, StoreConfig, StoreError};
use async_trait::async_trait;
use common::models::{Coin, Series};
use influxdb2::models::DataPoint;
use tracing::{debug, error};

/// Stores each series as one batch, one measurement per coin symbol.
///
/// A connection is opened for every `store` call and closed again on every
/// exit path, including failed point construction and rejected writes.
pub struct InfluxSeriesStore<B = InfluxBackend> {
    backend: B,
    database: String,
}

impl InfluxSeriesStore<InfluxBackend> {
    pub fn from_config(config: StoreConfig) -> Self {
        let database = config.bucket.clone();
        Self::new(InfluxBackend::new(config), database)
    }
}

impl<B: SeriesBackend> InfluxSeriesStore<B> {
    pub fn new(backend: B, database: impl Into<String>) -> Self {
        Self {
            backend,
            database: database.into(),
        }
    }
}

#[async_trait]
impl<B: SeriesBackend> SeriesStore for InfluxSeriesStore<B> {
    async fn store(&self, series: &Series) -> Result<(), StoreError> {
        let mut connection = self
            .backend
            .connect()
            .await
            .map_err(StoreError::ConnectError)?;

        let result = write_series(&mut connection, &self.database, series).await;

        if let Err(e) = connection.close().await {
            error!("failed to close influx connection: {}", e);
        }
        result
    }
}

async fn write_series<C: BackendConnection>(
    connection: &mut C,
    database: &str,
    series: &Series,
) -> Result<(), StoreError> {
    let batch = create_batch(database, series)?;

    if batch.is_empty() {
        debug!("Series is empty, skipping write to {}", database);
        return Ok(());
    }

    connection
        .write(batch)
        .await
        .map_err(StoreError::WriteError)
}

/// Build the batch for a series. Fails on the first coin that cannot become
/// a point, so a batch is either complete or not built at all.
pub fn create_batch(database: &str, series: &Series) -> Result<BatchPoints, StoreError> {
    let mut batch = BatchPoints::new(database, Precision::Nanoseconds);
    for coin in series {
        batch.add_point(create_point(coin)?);
    }
    Ok(batch)
}

/// One point per coin: measurement is the symbol, no tags.
pub fn create_point(coin: &Coin) -> Result<DataPoint, StoreError> {
    let invalid = |reason: String| StoreError::PointConstructionError {
        coin: Box::new(coin.clone()),
        reason,
    };

    if coin.symbol.is_empty() {
        return Err(invalid("symbol must not be empty".to_string()));
    }
    if !coin.price_in_dollar.is_finite() {
        return Err(invalid(format!(
            "priceInDollar must be finite, got {}",
            coin.price_in_dollar
        )));
    }
    let nanos = coin
        .timestamp
        .timestamp_nanos_opt()
        .ok_or_else(|| invalid("timestamp does not fit in nanoseconds".to_string()))?;

    DataPoint::builder(coin.symbol.clone())
        .field("name", coin.name.clone())
        .field("priceInDollar", coin.price_in_dollar)
        .timestamp(nanos)
        .build()
        .map_err(|e| invalid(e.to_string()))
}
