//! Pokedex - an interactive PokeAPI explorer
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Create the response cache (starts its sweep task)
//! 4. Build the API client and session
//! 5. Run the REPL on stdin/stdout until `exit`, EOF, or Ctrl+C
//! 6. Shut the cache sweep down

use std::io;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Config, PokeApiClient, Session, TtlCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the prompt.
    // Defaults to "warn", can be overridden with RUST_LOG env var.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        api_url = %config.api_url,
        cache_interval = ?config.cache_interval,
        http_timeout = ?config.http_timeout,
        "Configuration loaded"
    );

    let cache = Arc::new(TtlCache::new(config.cache_interval));
    let client =
        PokeApiClient::new(&config, cache.clone()).context("failed to build HTTP client")?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    println!("Welcome to the Pokedex!");
    let interrupted = tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => {
            result.context("terminal I/O failed")?;
            false
        }
        _ = signal::ctrl_c() => {
            println!();
            info!("Received Ctrl+C, shutting down");
            true
        }
    };

    let stats = cache.stats();
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        expired = stats.expired,
        entries = stats.total_entries,
        "Cache statistics"
    );
    cache.shutdown().await;

    if interrupted {
        // A pending blocking stdin read would otherwise hold the runtime open.
        std::process::exit(0);
    }
    Ok(())
}
