//! schoolfinder server binary

use anyhow::Context;
use clap::Parser;
use schoolfinder_api::server;
use schoolfinder_api::{AppState, Overrides, Settings};
use schoolfinder_core::logging_facility::{self, Profile};
use schoolfinder_store::SqliteSchoolStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "schoolfinder")]
#[command(about = "School directory service - register schools and list them by distance", long_about = None)]
struct Cli {
    /// TOML config file (defaults to ./schoolfinder.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database file, or :memory:
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// development (human-readable) or production (JSON)
    #[arg(long)]
    log_profile: Option<Profile>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            port: self.port,
            database: self.database.clone(),
            log_profile: self.log_profile,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(&cli.overrides()).context("failed to load settings")?;
    logging_facility::init(settings.logging.profile);

    let store = SqliteSchoolStore::open(&settings.database.path).with_context(|| {
        format!(
            "failed to initialize school store at {}",
            settings.database.path.display()
        )
    })?;
    let existing = store.count().await.context("failed to read school store")?;
    tracing::info!(schools = existing, "school store initialized");

    server::run(&settings.server, AppState::new(Arc::new(store))).await?;
    Ok(())
}
