use clap::Parser;
use eventsweep::application::sweeper::LifecycleSweeper;
use eventsweep::config::StoreConfig;
use eventsweep::infrastructure::clock::SystemClock;
use eventsweep::infrastructure::in_memory::InMemoryStore;
use eventsweep::infrastructure::rocksdb::RocksDbStore;
use eventsweep::interfaces::json::seed_reader::{Seed, SeedReader, SeedTarget};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runs one lifecycle sweep over the marketplace document store. Recurrence
/// is the caller's business (cron, systemd timer, or a job endpoint).
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional JSON seed file loaded into the store before the sweep
    seed: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("eventsweep=info".parse().into_diagnostic()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let seed = match &cli.seed {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            Some(SeedReader::new(file).read().into_diagnostic()?)
        }
        None => None,
    };

    let report = if let Some(db_path) = cli.db_path {
        // Persistent storage (RocksDB)
        let store = RocksDbStore::open(&StoreConfig::new(db_path)).into_diagnostic()?;
        load_seed(seed, &store).await?;
        let sweeper = LifecycleSweeper::from_store(store, Box::new(SystemClock));
        sweeper.run().await.into_diagnostic()?
    } else {
        // In-memory storage, useful with a seed file for dry runs
        let store = InMemoryStore::new();
        load_seed(seed, &store).await?;
        let sweeper = LifecycleSweeper::from_store(store, Box::new(SystemClock));
        sweeper.run().await.into_diagnostic()?
    };

    println!("{report}");
    Ok(())
}

async fn load_seed(seed: Option<Seed>, target: &dyn SeedTarget) -> Result<()> {
    if let Some(seed) = seed {
        let loaded = seed.load_into(target).await.into_diagnostic()?;
        tracing::info!(loaded, "seed documents loaded");
    }
    Ok(())
}
