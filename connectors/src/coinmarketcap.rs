use crate::http::{HttpClient, HttpResponse, TickerRequest};
use crate::QuoteSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    models::{Coin, Series},
    Error, Result,
};
use serde::Deserialize;
use tracing::{debug, error};

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const LISTING_QUERY: [(&str, &str); 3] = [("start", "1"), ("limit", "500"), ("convert", "USD")];

const ENV_TICKER_ENDPOINT: &str = "TICKER_ENDPOINT";
const ENV_TICKER_API_KEY: &str = "TICKER_API_KEY";

/// Where and how to reach the quote API
#[derive(Debug, Clone)]
pub struct TickerConfig {
    /// Listings endpoint URL
    pub endpoint: String,
    /// Sent with every request in the `X-CMC_PRO_API_KEY` header
    pub api_key: String,
}

impl TickerConfig {
    /// Create a new ticker configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENV_TICKER_ENDPOINT).map_err(|_| {
            Error::ConfigError(format!("{} environment variable not set", ENV_TICKER_ENDPOINT))
        })?;
        let api_key = std::env::var(ENV_TICKER_API_KEY).map_err(|_| {
            Error::ConfigError(format!("{} environment variable not set", ENV_TICKER_API_KEY))
        })?;

        Ok(Self { endpoint, api_key })
    }
}

/// Body of a listings response. Only the fields the mapping reads are kept.
#[derive(Debug, Deserialize)]
pub struct ListingsResponse {
    pub data: Vec<CmcQuote>,
}

#[derive(Debug, Deserialize)]
pub struct CmcQuote {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub quote: Quote,
}

/// Quotes keyed by currency. Only USD is read, other currencies are ignored.
#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(rename = "USD")]
    pub usd: Price,
}

#[derive(Debug, Deserialize)]
pub struct Price {
    pub price: f64,
}

/// Fetches a series of coins from a CoinMarketCap-style listings endpoint.
///
/// The clock is read once per fetch and its value is shared by every coin of
/// the resulting series.
pub struct CoinMarketCapTicker<H, C = fn() -> DateTime<Utc>> {
    client: H,
    clock: C,
    config: TickerConfig,
}

impl<H, C> CoinMarketCapTicker<H, C>
where
    H: HttpClient,
    C: Fn() -> DateTime<Utc> + Send + Sync,
{
    pub fn new(config: TickerConfig, client: H, clock: C) -> Self {
        Self {
            client,
            clock,
            config,
        }
    }

    fn listings_request(&self) -> TickerRequest {
        TickerRequest {
            url: self.config.endpoint.clone(),
            headers: vec![(API_KEY_HEADER, self.config.api_key.clone())],
            query: LISTING_QUERY.to_vec(),
        }
    }

    async fn retrieve(&self) -> Result<H::Response> {
        let request = self.listings_request();

        debug!("Fetching listings from ticker: {}", request.url);

        let response = self
            .client
            .send(&request)
            .await
            .map_err(Error::TransportError)?;

        let status = response.status();
        if !status.is_success() {
            error!("Ticker API error: {}", status);
            return Err(Error::UnsuccessfulResponseError {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("<unknown status code>")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl<H, C> QuoteSource for CoinMarketCapTicker<H, C>
where
    H: HttpClient,
    C: Fn() -> DateTime<Utc> + Send + Sync,
{
    async fn fetch(&self) -> Result<Series> {
        let response = self.retrieve().await?;

        let body = response.bytes().await.map_err(Error::ReadError)?;
        let listings: ListingsResponse = serde_json::from_slice(&body)?;

        debug!("Decoded {} listings", listings.data.len());

        Ok(map_to_series(listings, (self.clock)()))
    }
}

/// Map listings to coins stamped with `timestamp`, keeping the response order.
pub fn map_to_series(listings: ListingsResponse, timestamp: DateTime<Utc>) -> Series {
    listings
        .data
        .into_iter()
        .map(|quote| Coin {
            symbol: quote.symbol,
            name: quote.name,
            price_in_dollar: quote.quote.usd.price,
            timestamp,
        })
        .collect()
}
