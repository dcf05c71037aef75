#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the bike-share visualization server.
//!
//! Without a subcommand the server starts with configuration from the
//! environment (`BIND_ADDR`, `PORT`, `BIKE_VIZ_DATA`).

use bike_viz_chart::ChartKind;
use bike_viz_server::ServerConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bike_viz_server", about = "Bike-share visualization server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server using environment configuration
    Serve,
    /// Prompt for configuration, then start the server
    Interactive,
    /// Print one chart specification as JSON
    Spec {
        /// Chart slug (e.g. `scatter-bar`)
        #[arg(value_parser = parse_chart_kind)]
        chart: ChartKind,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

fn parse_chart_kind(s: &str) -> Result<ChartKind, String> {
    s.parse().map_err(|_| {
        let known: Vec<String> = ChartKind::ALL.iter().map(ToString::to_string).collect();
        format!("unknown chart '{s}' (expected one of: {})", known.join(", "))
    })
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => bike_viz_server::run_server(&ServerConfig::from_env()).await?,
        Commands::Interactive => bike_viz_server::interactive::run().await?,
        Commands::Spec { chart, pretty } => {
            let config = ServerConfig::from_env();
            let table = bike_viz_dataset::load(&config.data_path)?;
            let spec = chart.build(&table)?;
            let json = if pretty {
                spec.to_json_pretty()?
            } else {
                spec.to_json()?
            };
            println!("{json}");
        }
    }

    Ok(())
}
