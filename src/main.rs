mod commands;

use crate::commands::{apportion, convert, info};
use apportionment::formats::vote_sheet::DEFAULT_BARRIER;
use apportionment::formats::SheetOptions;
use apportionment::ApportionOptions;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(version, about = "Seat apportionment from per-district vote counts")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Allocate seats per district and print per-party totals.
    Apportion {
        /// Results file (JSON with "Seats", "Barrier" and one key per party)
        input: PathBuf,
        /// Use proportional rounding instead of D'Hondt
        #[clap(long)]
        proportional: bool,
        /// Seat count for a district, overriding the results file (e.g. "Madrid=37")
        #[clap(long = "seats", value_name = "DISTRICT=SEATS", value_parser = parse_seat_override)]
        seats: Vec<(String, u32)>,
        /// JSON file mapping party names to display colors
        #[clap(long)]
        palette: Option<PathBuf>,
        /// Print the report as JSON instead of text
        #[clap(long)]
        json: bool,
    },
    /// Validate and dump info about a results file.
    Info {
        /// Results file
        input: PathBuf,
    },
    /// Convert a per-district vote sheet (CSV or spreadsheet) into a results file.
    Convert {
        /// Vote sheet to read
        sheet: PathBuf,
        /// Results file to write
        output: PathBuf,
        /// Barrier written for every district
        #[clap(long, value_parser, default_value_t = DEFAULT_BARRIER)]
        barrier: f64,
    },
}

fn parse_seat_override(value: &str) -> Result<(String, u32), String> {
    let (district, seats) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected DISTRICT=SEATS, got {:?}", value))?;
    let seats = seats
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid seat count in {:?}: {}", value, e))?;
    Ok((district.trim().to_string(), seats))
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let result = match opts.command {
        Command::Apportion {
            input,
            proportional,
            seats,
            palette,
            json,
        } => apportion(
            &input,
            &ApportionOptions::from_flag(proportional),
            &seats,
            palette.as_deref(),
            json,
        ),
        Command::Info { input } => info(&input),
        Command::Convert {
            sheet,
            output,
            barrier,
        } => convert(&sheet, &output, &SheetOptions { barrier }),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "❌".red(), e.to_string().red());
        std::process::exit(1);
    }
}
