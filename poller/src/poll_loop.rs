use common::Result;
use connectors::QuoteSource;
use std::future::Future;
use std::time::Duration;
use store::SeriesStore;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info};

/// Fetch and store once per `period` until `shutdown` resolves.
///
/// Cycles never overlap. A shutdown that arrives mid-cycle is honored once
/// that cycle has finished, and no further cycle is started.
pub async fn run<Q, S, F>(source: &Q, store: &S, period: Duration, shutdown: F)
where
    Q: QuoteSource,
    S: SeriesStore,
    F: Future<Output = ()>,
{
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("Got an interrupt, stopping...");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = run_tick(source, store).await {
                    error!("{}", e);
                }
            }
        }
    }
}

/// One fetch followed by one store. Nothing is stored when the fetch fails.
async fn run_tick<Q, S>(source: &Q, store: &S) -> Result<usize>
where
    Q: QuoteSource,
    S: SeriesStore,
{
    let start = Instant::now();
    let series = source.fetch().await?;
    info!(
        "received series in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    store.store(&series).await?;
    info!(
        "wrote {} coins in {:.3} seconds",
        series.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(series.len())
}
