//! `populate-geo` — seed the country, state and city tables from IBGE.
//!
//! Reads `geo-sync.toml` (or the path given with `--config`), opens the
//! SQLite store and runs one geo sync. The run report goes to stdout, logs to
//! stderr. Exits non-zero if the run aborted.
//!
//! ```
//! cargo run -p salon-geo-sync --bin populate-geo -- --store ~/salon.db
//! ```

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use salon_geo_sync::{GeoSync, SyncSettings};
use salon_ibge::IbgeClient;
use salon_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Populate country, state and city data from the IBGE API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "geo-sync.toml")]
  config: PathBuf,

  /// SQLite database to populate (overrides `store_path`).
  #[arg(long, env = "SALON_STORE_PATH")]
  store: Option<PathBuf>,

  /// IBGE localities API base URL (overrides `ibge_base_url`).
  #[arg(long)]
  base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let mut settings = SyncSettings::load(&cli.config).context("failed to read configuration")?;
  if let Some(store) = cli.store {
    settings.store_path = store;
  }
  if let Some(base_url) = cli.base_url {
    settings.ibge_base_url = base_url;
  }

  let store_path = settings.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let source = IbgeClient::new(settings.ibge()).context("failed to build IBGE client")?;

  let report = GeoSync::new(&store, &source, settings.country()).run().await;
  println!("{report}");

  Ok(if report.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
