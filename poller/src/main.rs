mod config;
mod poll_loop;

use chrono::Utc;
use config::PollerConfig;
use connectors::coinmarketcap::{CoinMarketCapTicker, TickerConfig};
use std::time::Duration;
use store::{InfluxSeriesStore, StoreConfig};
use tokio::signal;
use tracing::{error, info};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(config::log_level_from_env())
        .init();

    let config = PollerConfig::from_env();
    let ticker_config = TickerConfig::from_env()?;
    let store_config = StoreConfig::from_env()?;

    let http_client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let ticker = CoinMarketCapTicker::new(ticker_config, http_client, Utc::now);
    let store = InfluxSeriesStore::from_config(store_config);

    info!(
        "Started cryptoflux, polling ticker every {:?}",
        config.poll_interval
    );

    poll_loop::run(&ticker, &store, config.poll_interval, shutdown_signal()).await;

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
