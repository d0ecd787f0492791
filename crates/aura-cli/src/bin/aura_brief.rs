//! Route weather briefing from local METAR/TAF JSON.
//!
//! Usage:
//!   aura-brief brief --route "KJFK KBOS" --metars metars.json --tafs tafs.json
//!   aura-brief arc --from 40.64,-73.78 --to 51.47,-0.45
//!   aura-brief aircraft

use std::path::PathBuf;

use anyhow::Result;
use aura_cli::commands::{aircraft, arc, brief};
use aura_cli::parse_lat_lon;
use aura_core::{BriefingRules, GeoPoint};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Route weather briefings: arcs, performance and alternates")]
struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Brief a route from METAR (and optional TAF) JSON files
    Brief {
        /// Airport identifiers separated by spaces or commas
        #[arg(long)]
        route: String,
        /// aviationweather.gov METAR JSON
        #[arg(long, env = "AURA_METARS")]
        metars: PathBuf,
        /// aviationweather.gov TAF JSON
        #[arg(long, env = "AURA_TAFS")]
        tafs: Option<PathBuf>,
        /// Aircraft type (C172, B737, A320)
        #[arg(long, env = "AURA_AIRCRAFT")]
        aircraft: Option<String>,
        /// Samples per map arc in JSON output
        #[arg(long, env = "AURA_ARC_SAMPLES", default_value_t = 64)]
        samples: usize,
        /// Print the full briefing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sample the great circle between two points
    Arc {
        /// Start as LAT,LON
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        from: GeoPoint,
        /// End as LAT,LON
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        to: GeoPoint,
        #[arg(long, default_value_t = 64)]
        samples: usize,
        #[arg(long)]
        json: bool,
    },
    /// List supported aircraft
    Aircraft,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose { "aura_core=debug,aura_cli=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)))
        .init();

    let output = match args.command {
        Command::Brief { route, metars, tafs, aircraft, samples, json } => {
            let rules = BriefingRules::default();
            let rules = BriefingRules {
                arc_samples: rules.clamp_samples(samples),
                ..rules
            };
            let brief_args = brief::BriefArgs {
                route: &route,
                metars: &metars,
                tafs: tafs.as_deref(),
                aircraft: aircraft.as_deref(),
                json,
            };
            brief::run(&brief_args, &rules)?
        }
        Command::Arc { from, to, samples, json } => arc::run(from, to, samples, json)?,
        Command::Aircraft => aircraft::run(),
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
