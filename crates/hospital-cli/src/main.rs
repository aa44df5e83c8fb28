//! Hospital directory console.

mod config;
mod menu;
mod render;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hospital_core::store::MemoryDirectory;
use hospital_core::{ClassifierAdapter, Database};
use tracing_subscriber::EnvFilter;

use crate::menu::Console;

#[derive(Parser, Debug)]
#[command(name = "hospital", version, about = "Hospital doctor/patient directory with a symptom checker")]
struct Args {
    /// SQLite database file
    #[arg(long, value_name = "PATH", default_value = config::DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Keep records in memory for this session only, starting from the default doctors
    #[arg(long, conflicts_with = "db")]
    memory: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let classifier = ClassifierAdapter::reference().context("failed to fit symptom classifier")?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    if args.memory {
        let mut store = MemoryDirectory::with_default_doctors();
        Console::new(&mut store, &classifier, stdin.lock(), stdout.lock()).run()?;
    } else {
        let mut db = Database::open(&args.db)
            .with_context(|| format!("failed to open database {}", args.db.display()))?;
        Console::new(&mut db, &classifier, stdin.lock(), stdout.lock()).run()?;
    }

    Ok(())
}
