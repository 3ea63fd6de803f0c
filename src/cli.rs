use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::HttpTicketApi;
use crate::config::HarvestConfig;
use crate::harvest::harvest;
use crate::load_config::load_config;

/// CLI for ftdb-harvest: dump the construction-kit catalogue as one JSON snapshot.
#[derive(Parser)]
#[clap(
    name = "ftdb-harvest",
    version,
    about = "Harvest the ft-datenbank.de construction-kit catalogue into a canonical JSON snapshot"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl the catalogue and write the snapshot document
    Dump {
        /// Path to the YAML config file (compiled defaults when omitted)
        #[clap(long)]
        config: Option<PathBuf>,
        /// Where to write the snapshot JSON
        #[clap(long, default_value = "ftdb-snapshot.json")]
        output: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Dump { config, output } => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => {
                    let config = HarvestConfig::default();
                    config.trace_loaded();
                    config
                }
            };
            let client = HttpTicketApi::new(Duration::from_secs(config.request_timeout_secs))?;
            println!("Harvest starting...");
            match harvest(&client, &config).await {
                Ok((snapshot, report)) => {
                    snapshot.write_to(&output)?;
                    println!("Harvest complete.\nReport:");
                    println!("{:#?}", report);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("[ERROR] Harvest failed: {}", e);
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
