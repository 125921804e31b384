use crate::backend::{BackendConnection, BatchPoints, Precision, SeriesBackend};
use crate::StoreConfig;
use async_trait::async_trait;
use common::BoxError;
use futures::stream;
use influxdb2::Client;
use tracing::debug;

/// InfluxDB v2 backend, opening one client per connection
pub struct InfluxBackend {
    config: StoreConfig,
}

impl InfluxBackend {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SeriesBackend for InfluxBackend {
    type Connection = InfluxConnection;

    async fn connect(&self) -> Result<InfluxConnection, BoxError> {
        if self.config.url.is_empty() {
            return Err("InfluxDB URL is empty".into());
        }

        debug!("Connecting to InfluxDB at {}", self.config.url);

        Ok(InfluxConnection {
            client: Client::new(&self.config.url, &self.config.org, &self.config.token),
        })
    }
}

pub struct InfluxConnection {
    client: Client,
}

#[async_trait]
impl BackendConnection for InfluxConnection {
    async fn write(&mut self, batch: BatchPoints) -> Result<(), BoxError> {
        // the v2 write endpoint takes nanosecond timestamps unless told otherwise
        debug_assert_eq!(batch.precision(), Precision::Nanoseconds);

        let bucket = batch.database().to_string();
        debug!("Writing {} points to bucket {}", batch.len(), bucket);

        self.client
            .write(&bucket, stream::iter(batch.into_points()))
            .await
            .map_err(|e| BoxError::from(e.to_string()))
    }

    async fn close(self) -> Result<(), BoxError> {
        drop(self.client);
        Ok(())
    }
}
