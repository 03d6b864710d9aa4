//! # agri-cli
//!
//! Command-line interface over the crop price engines. Every command
//! prints pretty JSON in the same shape the HTTP API returns.

use std::path::PathBuf;
use std::sync::Arc;

use agri_facade::{Catalog, CatalogError, CropMarket, CsvSeriesStore, EngineConfig, MarketError};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Market(#[from] MarketError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Parser)]
#[command(name = "agri")]
#[command(about = "Crop price statistics, forecasts and recommendations", long_about = None)]
struct Cli {
    /// Directory holding the *_prices.csv files
    #[arg(long, env = "AGRI_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// JSON catalog replacing the built-in crops and locations
    #[arg(long, env = "AGRI_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List crop keys
    Crops,

    /// List location keys and labels
    Locations,

    /// Historical statistics for one crop
    Stats {
        crop: String,

        #[arg(short, long)]
        location: Option<String>,
    },

    /// Forecast prices for the coming months
    Forecast {
        crop: String,

        /// Number of months to forecast (1-60)
        #[arg(short, long, default_value = "6")]
        months: usize,

        #[arg(short, long)]
        location: Option<String>,
    },

    /// Where to sell and what to grow
    Recommend {
        #[arg(short, long)]
        crop: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long, default_value = "6")]
        months: usize,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_market(data_dir: PathBuf, catalog: Option<PathBuf>) -> CliResult<CropMarket> {
    let catalog = match catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };
    tracing::debug!(data_dir = %data_dir.display(), "using CSV series store");
    let market = EngineConfig::default()
        .build_market(Arc::new(catalog), Arc::new(CsvSeriesStore::new(data_dir)))?;
    Ok(market)
}

fn render<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Execute one command against `market`, returning the JSON to print
fn run(market: &CropMarket, command: Commands) -> CliResult<String> {
    match command {
        Commands::Crops => render(&json!({ "crops": market.catalog().crop_keys() })),
        Commands::Locations => {
            let locations: Map<String, Value> = market
                .catalog()
                .locations()
                .iter()
                .map(|l| (l.key.clone(), Value::String(l.label.clone())))
                .collect();
            render(&json!({ "locations": locations }))
        }
        Commands::Stats { crop, location } => {
            render(&market.crop_summary(&crop, location.as_deref())?)
        }
        Commands::Forecast {
            crop,
            months,
            location,
        } => render(&market.crop_forecast(&crop, location.as_deref(), months)?),
        Commands::Recommend {
            crop,
            location,
            months,
        } => render(&market.recommendations(crop.as_deref(), location.as_deref(), months)?),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = build_market(cli.data_dir, cli.catalog).and_then(|market| run(&market, cli.command));

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn market_with(files: &[(&str, &str)]) -> (TempDir, CropMarket) {
        let dir = TempDir::new().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let market = build_market(dir.path().to_path_buf(), None).unwrap();
        (dir, market)
    }

    fn monthly(prices: &[f64]) -> String {
        let mut body = String::from("month,price\n");
        for (i, price) in prices.iter().enumerate() {
            body.push_str(&format!("2022-{:02},{}\n", i + 1, price));
        }
        body
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["agri", "forecast", "rice", "--months", "3", "-l", "dmart"])
            .unwrap();
        match cli.command {
            Commands::Forecast {
                crop,
                months,
                location,
            } => {
                assert_eq!(crop, "rice");
                assert_eq!(months, 3);
                assert_eq!(location.as_deref(), Some("dmart"));
            }
            _ => panic!("expected forecast"),
        }
    }

    #[test]
    fn test_crops_and_locations() {
        let (_dir, market) = market_with(&[]);
        let crops: Value = serde_json::from_str(&run(&market, Commands::Crops).unwrap()).unwrap();
        assert_eq!(crops["crops"][0], "tomato");

        let locations: Value =
            serde_json::from_str(&run(&market, Commands::Locations).unwrap()).unwrap();
        assert_eq!(locations["locations"]["reliance_digital"], "Reliance Digital");
    }

    #[test]
    fn test_stats_output() {
        let (_dir, market) = market_with(&[("wheat_prices.csv", &monthly(&[30.0; 12]))]);
        let output = run(
            &market,
            Commands::Stats {
                crop: "wheat".to_string(),
                location: None,
            },
        )
        .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["crop_name"], "Wheat");
        assert_eq!(value["trend_percentage"], 0.0);
    }

    #[test]
    fn test_unknown_crop_is_an_error() {
        let (_dir, market) = market_with(&[]);
        let err = run(
            &market,
            Commands::Forecast {
                crop: "mango".to_string(),
                months: 6,
                location: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Crop not found");
    }
}
