//! Capabilities a time-series backend has to offer the series store.

use async_trait::async_trait;
use common::BoxError;
use influxdb2::models::data_point::{DataPoint, WriteDataPoint};
use std::io;

/// Timestamp precision of the points in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Nanoseconds,
}

/// Points submitted to one database in a single write call
pub struct BatchPoints {
    database: String,
    precision: Precision,
    points: Vec<DataPoint>,
}

impl BatchPoints {
    pub fn new(database: impl Into<String>, precision: Precision) -> Self {
        Self {
            database: database.into(),
            precision,
            points: Vec::new(),
        }
    }

    pub fn add_point(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<DataPoint> {
        self.points
    }

    /// Render the batch as InfluxDB line protocol, one line per point.
    pub fn to_line_protocol(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        for point in &self.points {
            point.write_data_point_to(&mut buf)?;
        }
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Opens connections to a time-series database.
#[async_trait]
pub trait SeriesBackend: Send + Sync {
    type Connection: BackendConnection;

    async fn connect(&self) -> Result<Self::Connection, BoxError>;
}

/// A live connection. Must be closed once the caller is done with it.
#[async_trait]
pub trait BackendConnection: Send {
    /// Submit every point of the batch in one call.
    async fn write(&mut self, batch: BatchPoints) -> Result<(), BoxError>;

    async fn close(self) -> Result<(), BoxError>;
}
