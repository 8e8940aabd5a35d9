//! FitTrack API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use fittrack::api::{self, ApiError, Config};
use fittrack::db::{Database, DbError, SqliteDatabase};
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(fittrack::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(fittrack::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(fittrack::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "fittrack-api")]
#[command(author, version, about = "FitTrack API server", long_about = None)]
struct Cli {
    /// Host address to bind to [env: FITTRACK_HOST, default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [env: FITTRACK_PORT, default: 3000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path [env: FITTRACK_DB, default: ~/.local/share/fittrack/fittrack.db]
    #[arg(long)]
    db: Option<PathBuf>,
}

impl Cli {
    /// Apply CLI flags over env-derived configuration.
    fn into_config(self) -> Config {
        let mut config = Config::new();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(db) = self.db {
            config = config.with_db_path(db);
        }
        config
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await.map_err(miette::Report::new)
}

async fn run() -> Result<(), BinaryError> {
    let config = Cli::parse().into_config();
    api::init_tracing();

    info!("Opening database at {}", config.db_path.display());

    if let Some(parent) = config.db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&config.db_path).await?;

    // Schema must exist before the server accepts traffic
    db.migrate().await?;
    info!("Database schema ready");

    api::run(config, db).await?;

    Ok(())
}
