//! Command-line access to the phonebook store.
//!
//! With no contact arguments every stored contact is printed. With a name
//! and a number the contact is validated and added.

use anyhow::{Context, Result};
use clap::Parser;
use phonebook_directory::infrastructure::SledContactRepository;
use phonebook_directory::{ContactInput, ContactRepository, ContactService, DirectoryConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "phonebook-seed")]
#[command(about = "List or add phonebook contacts")]
struct Args {
    /// Data directory for persistence.
    #[arg(short, long, env = "PHONEBOOK_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Name of the contact to add.
    #[arg(requires = "number")]
    name: Option<String>,

    /// Number of the contact to add.
    number: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
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

    run(args, &mut std::io::stdout()).await
}

/// Open the store under `args.data_dir`, list or add, then flush.
async fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let config = DirectoryConfig {
        data_dir: args.data_dir,
        ..Default::default()
    };
    std::fs::create_dir_all(&config.data_dir).context("Failed to create data directory")?;
    let store =
        SledContactRepository::open(config.store_path()).context("Failed to open contact store")?;
    let service = ContactService::new(store);

    seed(&service, args.name, args.number, out).await?;

    service
        .repository()
        .flush()
        .await
        .context("Failed to flush contact store")?;

    Ok(())
}

/// Add the contact when both fields are given, otherwise print the phonebook.
async fn seed<R: ContactRepository>(
    service: &ContactService<R>,
    name: Option<String>,
    number: Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    match (name, number) {
        (Some(name), Some(number)) => {
            let contact = service.create(ContactInput::new(name, number)).await?;
            writeln!(
                out,
                "Added {} with number {} to the phonebook.",
                contact.name, contact.number
            )?;
        }
        _ => {
            writeln!(out, "Phonebook:")?;
            for contact in service.list().await? {
                writeln!(out, "{} {}", contact.name, contact.number)?;
            }
        }
    }
    Ok(())
}
