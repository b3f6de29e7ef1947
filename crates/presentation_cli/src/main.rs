//! RouteSafe CLI
//!
//! Plans tall-vehicle routes against a routing backend and prints the
//! summary, bridge warnings, directions and map overlay.

#![allow(clippy::print_stdout)]

mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::{RoutePlanner, RoutingPort};
use clap::{Parser, Subcommand};
use domain::RouteForm;
use infrastructure::{AppConfig, GeoJsonMapAdapter, LoggingConfig, RoutingAdapter, init_logging};
use integration_routing::ClientMode;
use tracing::debug;

/// RouteSafe CLI
#[derive(Parser)]
#[command(name = "routesafe-cli")]
#[command(author, version, about = "Low-bridge aware route planner for tall vehicles", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./routesafe.toml if present)
    #[arg(short, long, env = "ROUTESAFE_CONFIG")]
    config: Option<PathBuf>,

    /// Routing backend URL (overrides configuration)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Use generated demo routes instead of a backend
    #[arg(long, global = true)]
    fixture: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route
    ///
    /// Example: routesafe-cli plan --start "Leeds" --end "York" --height 4.2
    Plan {
        /// Start location
        #[arg(short, long)]
        start: String,

        /// End location
        #[arg(short, long)]
        end: String,

        /// Vehicle height in metres
        #[arg(long = "height", allow_hyphen_values = true)]
        height: String,

        /// Keep routes that pass under low bridges
        #[arg(long)]
        allow_low_bridges: bool,

        /// Write the map overlay as GeoJSON to this file
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Print the rendered views as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check routing backend health
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log filter for this run: `-v` flags win over the configured filter
fn log_filter(verbose: u8, configured: &str) -> String {
    if verbose > 0 {
        log_filter_from_verbosity(verbose).to_string()
    } else {
        configured.to_string()
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

/// Apply command-line overrides to the loaded configuration
fn apply_overrides(config: &mut AppConfig, url: Option<String>, fixture: bool) {
    if let Some(url) = url {
        config.routing.base_url = url;
    }
    if fixture {
        config.routing.mode = ClientMode::Fixture;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, cli.url, cli.fixture);

    init_logging(&LoggingConfig {
        filter: log_filter(cli.verbose, &config.logging.filter),
        format: config.logging.format,
    })?;
    debug!(mode = %config.routing.mode, base_url = %config.routing.base_url, "Configuration loaded");

    if let Err(problems) = config.validate() {
        anyhow::bail!("Invalid configuration:\n{problems}");
    }

    let adapter = RoutingAdapter::from_config(&config.routing.to_routing_config())?;

    match cli.command {
        Commands::Plan {
            start,
            end,
            height,
            allow_low_bridges,
            geojson,
            json,
        } => {
            let planner = RoutePlanner::new(Arc::new(adapter), GeoJsonMapAdapter::new());
            let form = RouteForm::new(start, end, height, !allow_low_bridges);

            match planner.submit(&form).await {
                Ok(route) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&route)?);
                    } else {
                        println!("{}", output::format_banner(&planner.banner()));
                        println!();
                        print!("{}", output::format_route(&route));
                    }

                    if let Some(path) = geojson {
                        let collection = planner.with_map(GeoJsonMapAdapter::to_feature_collection);
                        std::fs::write(&path, serde_json::to_string_pretty(&collection)?)?;
                        if !json {
                            println!("\n💾 Map overlay written to {}", path.display());
                        }
                    }
                },
                Err(e) => {
                    debug!(error = %e, "Route planning failed");
                    println!("{}", output::format_banner(&planner.banner()));
                    std::process::exit(1);
                },
            }
        },
        Commands::Health => {
            let mode = config.routing.mode;
            if mode == ClientMode::Fixture {
                println!("✅ Using demo routes (no backend)");
            } else if adapter.is_healthy().await {
                println!("✅ Routing backend is healthy ({})", config.routing.base_url);
            } else {
                println!("❌ Routing backend unavailable ({})", config.routing.base_url);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_log_filter_from_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[test]
    fn test_log_filter_uses_config_without_verbosity() {
        assert_eq!(log_filter(0, "routesafe=debug"), "routesafe=debug");
    }

    #[test]
    fn test_log_filter_verbosity_overrides_config() {
        assert_eq!(log_filter(1, "warn"), "info");
        assert_eq!(log_filter(3, "warn"), "trace");
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, Some("http://backend:9000".to_string()), true);
        assert_eq!(config.routing.base_url, "http://backend:9000");
        assert_eq!(config.routing.mode, ClientMode::Fixture);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, None, false);
        assert_eq!(config.routing.base_url, "http://localhost:8000");
        assert_eq!(config.routing.mode, ClientMode::Http);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[routing]\nmode = \"fixture\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.routing.mode, ClientMode::Fixture);
    }

    #[test]
    fn test_cli_parses_plan() {
        let cli = Cli::try_parse_from([
            "routesafe-cli",
            "-vv",
            "--fixture",
            "plan",
            "--start",
            "Leeds",
            "--end",
            "York",
            "--height",
            "4.2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.fixture);
        assert!(matches!(
            cli.command,
            Commands::Plan { ref height, allow_low_bridges: false, .. } if height == "4.2"
        ));
    }

    #[test]
    fn test_cli_accepts_negative_height_for_validation() {
        let cli = Cli::try_parse_from([
            "routesafe-cli", "plan", "-s", "Leeds", "-e", "York", "--height", "-1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Plan { ref height, .. } if height == "-1"));
    }
}
