//! Pantstation monitor CLI
//!
//! Polls the configured station pages, or fetches and parses them once.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use futures::future::join_all;
use pantstation::{
    error::{AppError, Result},
    models::Config,
    parser::parse_station_page,
    sensors::station_sensors,
    services::{HttpFetcher, PageFetcher, StationCoordinator, StationRegistry, StationSnapshot},
    utils::url::normalize_station_url,
};

/// pantstation - Dansk Retursystem station status monitor
#[derive(Parser, Debug)]
#[command(
    name = "pantstation",
    version,
    about = "Dansk Retursystem station status monitor"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "pantstation.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll all configured stations until interrupted
    Watch,

    /// Fetch configured stations once and print their sensor values
    Fetch {
        /// Only fetch the station with this URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Parse a saved station page and print the record
    Parse {
        /// HTML file to parse
        file: PathBuf,

        /// Source URL to record (default: the file path)
        #[arg(long)]
        url: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Watch => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            watch(&config).await?;
        }

        Command::Fetch { url } => {
            let config = Config::load(&cli.config)?;
            fetch_once(&config, url.as_deref()).await?;
        }

        Command::Parse { file, url } => {
            let html = tokio::fs::read_to_string(&file).await?;
            let source_url = url.unwrap_or_else(|| file.display().to_string());
            let record = parse_station_page(&source_url, &html, Utc::now());
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());
            let config = Config::load(&cli.config)?;

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            for station in config.stations()? {
                log::info!("✓ {} ({})", station.name, station.url);
            }
            log::info!("All validations passed!");
        }
    }

    Ok(())
}

/// Poll every station until Ctrl-C.
async fn watch(config: &Config) -> Result<()> {
    let registry = StationRegistry::from_config(config)?;
    log::info!("Watching {} station(s)", registry.len());

    for coordinator in registry.coordinators() {
        let mut updates = coordinator.subscribe();
        let name = coordinator.station().name.clone();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                log::info!("{}", describe(&name, &snapshot));
            }
        });
    }

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down...");
    registry.shutdown().await;
    Ok(())
}

/// Run one cycle per selected station and print the sensor values as JSON.
async fn fetch_once(config: &Config, url: Option<&str>) -> Result<()> {
    let filter = url.map(normalize_station_url).transpose()?;
    let stations: Vec<_> = config
        .stations()?
        .into_iter()
        .filter(|s| filter.as_deref().is_none_or(|url| s.url == url))
        .collect();

    if stations.is_empty() {
        return Err(AppError::config("No matching stations configured"));
    }

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.fetcher)?);
    let coordinators: Vec<_> = stations
        .into_iter()
        .map(|s| StationCoordinator::new(s, Arc::clone(&fetcher), config.fetcher.timeout()))
        .collect();

    join_all(coordinators.iter().map(|c| c.refresh())).await;

    let readings: Vec<_> = coordinators
        .iter()
        .flat_map(|c| station_sensors(c.station(), &c.snapshot()))
        .collect();
    println!("{}", serde_json::to_string_pretty(&readings)?);
    Ok(())
}

fn describe(name: &str, snapshot: &StationSnapshot) -> String {
    let Some(record) = &snapshot.record else {
        return format!("{name}: no data yet");
    };

    let state = record.drift_state().map_or("ukendt", |s| s.as_str());
    let stale = if snapshot.last_cycle_failed {
        " (last fetch failed)"
    } else {
        ""
    };
    match record.message() {
        Some(message) => format!("{name}: {state}, {message}{stale}"),
        None => format!("{name}: {state}{stale}"),
    }
}
