mod backend;
mod config;
mod error;
mod influx;
mod series_store;

pub use backend::{BackendConnection, BatchPoints, Precision, SeriesBackend};
pub use config::StoreConfig;
pub use error::StoreError;
pub use influx::{InfluxBackend, InfluxConnection};
pub use series_store::{create_batch, create_point, InfluxSeriesStore};

use async_trait::async_trait;
use common::models::Series;

/// Trait defining the interface for time-series stores fed by the poller
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// Persist the whole series as one batch
    async fn store(&self, series: &Series) -> Result<(), StoreError>;
}
