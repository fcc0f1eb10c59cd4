//! Phonebook directory binary entry point.
//!
//! Serves the `/persons` REST API, the info page, and the built front-end.

use anyhow::{Context, Result};
use clap::Parser;
use phonebook_directory::{DirectoryConfig, DirectoryServer};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Directory service CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "phonebook-directory")]
#[command(about = "Phonebook contact directory service")]
struct Args {
    /// HTTP port.
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// HTTP bind address.
    #[arg(short, long, env = "PHONEBOOK_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Data directory for persistence.
    #[arg(short, long, env = "PHONEBOOK_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Front-end build directory (defaults to `dist` when present).
    #[arg(short, long, env = "PHONEBOOK_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Upper bound on any single store operation, in seconds.
    #[arg(long, env = "PHONEBOOK_STORE_TIMEOUT_SECS", default_value_t = 5)]
    store_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    tracing::info!("Starting phonebook directory");
    tracing::info!("Data directory: {:?}", args.data_dir);

    let config = DirectoryConfig {
        data_dir: args.data_dir,
        http_addr: (args.bind, args.port).into(),
        static_dir: args.static_dir,
        store_timeout_secs: args.store_timeout_secs,
    };

    let server = DirectoryServer::new(config).context("Failed to create directory server")?;
    server.run().await?;

    Ok(())
}
