use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A crypto currency asset priced at a single instant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,
    /// Ticker symbol (e.g., "BTC"), also the measurement the coin is stored under
    pub symbol: String,
    /// Capture time, shared by every coin of one fetch
    pub timestamp: DateTime<Utc>,
    pub price_in_dollar: f64,
}

/// Coins captured by one fetch, in the order the ticker returned them
pub type Series = Vec<Coin>;

/// Orders coins by ascending capture time.
pub fn by_timestamp(a: &Coin, b: &Coin) -> Ordering {
    a.timestamp.cmp(&b.timestamp)
}

/// Stable sort of a series by ascending capture time.
///
/// Coins sharing a timestamp keep their relative order, so sorting a single
/// fetch is a no-op and merged fetches stay grouped by capture.
pub fn sort_by_timestamp(series: &mut Series) {
    series.sort_by(by_timestamp);
}
