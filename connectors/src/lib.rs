pub mod coinmarketcap;
pub mod http;

use async_trait::async_trait;
use common::{models::Series, Result};

/// Trait defining the interface for quote APIs polled by the fetcher
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the latest quotes as one series, single attempt
    async fn fetch(&self) -> Result<Series>;
}
