//! Writes against a live InfluxDB configured through the `INFLUXDB_*`
//! variables and reads the points back. Run with
//! `cargo test -p store -- --ignored`.

use chrono::{DateTime, TimeZone, Utc};
use common::models::Coin;
use store::{InfluxSeriesStore, SeriesStore, StoreConfig};

const EPSILON: f64 = 0.00000001;

fn fixed_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 11, 14, 13, 37, 0).unwrap()
}

fn config() -> StoreConfig {
    StoreConfig::from_env().expect("INFLUXDB_* variables must be set")
}

/// Rows of a `measurement` on the day of `fixed_date`, as header-keyed CSV
/// records with `_time`, `name` and `priceInDollar` columns.
async fn query_day(config: &StoreConfig, measurement: &str) -> Vec<Vec<(String, String)>> {
    let flux = format!(
        r#"from(bucket: "{}")
  |> range(start: 2018-11-14T00:00:00Z, stop: 2018-11-15T00:00:00Z)
  |> filter(fn: (r) => r._measurement == "{}")
  |> pivot(rowKey: ["_time"], columnKey: ["_field"], valueColumn: "_value")
  |> keep(columns: ["_time", "name", "priceInDollar"])"#,
        config.bucket, measurement
    );

    let response = reqwest::Client::new()
        .post(format!("{}/api/v2/query", config.url.trim_end_matches('/')))
        .query(&[("org", config.org.as_str())])
        .header("Authorization", format!("Token {}", config.token))
        .header("Content-Type", "application/vnd.flux")
        .header("Accept", "application/csv")
        .body(flux)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "query failed: {}", response.status());

    let body = response.text().await.unwrap();
    let mut lines = body.lines().map(str::trim).filter(|line| !line.is_empty());
    let header: Vec<String> = match lines.next() {
        Some(header) => header.split(',').map(str::to_string).collect(),
        None => return Vec::new(),
    };
    lines
        .filter(|line| *line != header.join(","))
        .map(|line| {
            header
                .iter()
                .cloned()
                .zip(line.split(',').map(str::to_string))
                .collect()
        })
        .collect()
}

fn column<'a>(row: &'a [(String, String)], name: &str) -> &'a str {
    row.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("column {} missing from {:?}", name, row))
}

#[tokio::test]
#[ignore]
async fn stores_coin_series_to_influx() {
    let config = config();
    let store = InfluxSeriesStore::from_config(config.clone());
    let series = vec![Coin {
        name: "Bitcoin".to_string(),
        symbol: "BTC".to_string(),
        timestamp: fixed_date(),
        price_in_dollar: 3874.8765,
    }];

    store.store(&series).await.unwrap();

    let rows = query_day(&config, "BTC").await;
    assert_eq!(rows.len(), 1, "expected one point, got {:?}", rows);
    let row = &rows[0];
    assert_eq!(column(row, "name"), "Bitcoin");
    let price: f64 = column(row, "priceInDollar").parse().unwrap();
    assert!((price - 3874.8765).abs() < EPSILON);
    let time = DateTime::parse_from_rfc3339(column(row, "_time")).unwrap();
    assert_eq!(time.with_timezone(&Utc), fixed_date());
}

#[tokio::test]
#[ignore]
async fn stores_empty_series_to_influx() {
    let config = config();
    let store = InfluxSeriesStore::from_config(config.clone());
    let before = query_day(&config, "BTC").await.len();

    store.store(&Vec::new()).await.unwrap();

    assert_eq!(query_day(&config, "BTC").await.len(), before);
}
