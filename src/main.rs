//! TTL Memo demo
//!
//! Two concurrent callers share one slow memoized function. The first caller
//! invalidates the function's cached results after its second call, which
//! forces both callers to recompute. Statistics are printed on exit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::signal;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_memo::{function_identity, Cache, CacheApi, Config, Memoized, Memoizer, StatisticsCache};

type DemoCache = StatisticsCache<Cache<String>>;

/// Main entry point for the memoization demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with statistics enabled
/// 4. Memoize the slow function and run both callers
/// 5. Stop early on Ctrl+C, then log statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_memo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL memo demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: ttl={}ms, polling_rate={}ms, work_delay={}ms, iterations={}",
        config.ttl_ms,
        config.polling_rate_ms,
        config.work_delay_ms,
        config.iterations()
    );

    let cache: Arc<DemoCache> = Arc::new(StatisticsCache::new(Cache::new()));
    cache.enable_statistics()?;
    let memoizer = Memoizer::new(Arc::clone(&cache));

    let work_delay = Duration::from_millis(config.work_delay_ms);
    let scream = Arc::new(memoizer.memoize(
        function_identity!(scream),
        move |k: &'static str| {
            std::thread::sleep(work_delay);
            k.to_uppercase()
        },
        config.ttl_ms,
    )?);

    let boo = tokio::spawn(caller(
        "boo",
        "@_@ boo!",
        Arc::clone(&scream),
        memoizer.clone(),
        config.clone(),
        true,
    ));
    let help = tokio::spawn(caller(
        "help me",
        "\\o/ help me!",
        Arc::clone(&scream),
        memoizer.clone(),
        config.clone(),
        false,
    ));
    let aborts = [boo.abort_handle(), help.abort_handle()];

    tokio::select! {
        (boo, help) = async { tokio::join!(boo, help) } => {
            boo??;
            help??;
        }
        _ = signal::ctrl_c() => {
            for handle in aborts {
                handle.abort();
            }
            warn!("Received Ctrl+C, callers aborted");
        }
    }

    if let Some(stats) = cache.statistics() {
        info!(
            "{} cached keys remain, statistics: {}",
            cache.keys(None).len(),
            serde_json::to_string(&stats)?
        );
    }

    info!("Demo complete");
    Ok(())
}

/// Calls the memoized function `config.iterations()` times, pausing whenever
/// a call returns fast enough to have come from the cache.
async fn caller<F>(
    name: &'static str,
    message: &'static str,
    scream: Arc<Memoized<DemoCache, F, &'static str, String>>,
    memoizer: Memoizer<DemoCache>,
    config: Config,
    invalidates: bool,
) -> anyhow::Result<()>
where
    F: Fn(&'static str) -> String + Send + Sync + 'static,
{
    let mut last_called = Instant::now();

    for i in 0..config.iterations() {
        let call = Arc::clone(&scream);
        let result = tokio::task::spawn_blocking(move || call.call(message)).await??;
        info!("({}) {}", name, result);

        let between_calls = last_called.elapsed().as_millis();
        last_called = Instant::now();
        info!("({}) ms between last 2 calls: {}", name, between_calls);

        if between_calls <= u128::from(config.cached_threshold_ms) {
            debug!("Polling... ({}) ({} ms)", name, config.polling_rate_ms);
            tokio::time::sleep(Duration::from_millis(config.polling_rate_ms)).await;
            last_called = Instant::now();
        }

        if invalidates && i == 1 {
            let removed = memoizer.invalidate(&*scream);
            warn!("Cache invalidated for all callers ({} entries removed)", removed);
        }
    }

    Ok(())
}
