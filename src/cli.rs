//! Command-line interface components.
//!
//! Argument parsing for both binaries, logging setup, and the end-of-run
//! summary.

use crate::config::{IndexConfig, ProcessorConfig};
use crate::constants::DEFAULT_GEOHASH_PRECISION;
use crate::models::{IndexStats, ProcessingStats};

use clap::{ArgAction, Parser};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "geonames_processor")]
#[command(about = "Join GeoNames postal codes to populated places and write JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// GeoNames feature dump (e.g. US.txt); repeat for several countries
    #[arg(short = 'g', long = "geo", value_name = "FILE", action = ArgAction::Append)]
    pub geo: Vec<PathBuf>,

    /// GeoNames postal code dump; repeat for several countries
    #[arg(short = 'p', long = "postal", value_name = "FILE", action = ArgAction::Append)]
    pub postal: Vec<PathBuf>,

    /// Destination JSON file
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_level(self.verbose)
        }
    }

    /// Spinners are shown unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    pub fn to_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            geo_paths: self.geo.clone(),
            postal_paths: self.postal.clone(),
            output_path: self.output_file.clone(),
            show_progress: self.show_progress(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "geohash_index")]
#[command(about = "Bucket postal codes from a reconciled JSON file by geohash prefix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct IndexArgs {
    /// Input JSON file (array of records)
    #[arg(value_name = "INPUT_JSON")]
    pub input_json: PathBuf,

    /// Output index JSON file (object of buckets)
    #[arg(value_name = "OUTPUT_JSON")]
    pub output_json: PathBuf,

    /// Geohash prefix length (1-12)
    #[arg(long, default_value_t = DEFAULT_GEOHASH_PRECISION)]
    pub precision: usize,

    /// Write compact JSON instead of indented JSON
    #[arg(long)]
    pub compact: bool,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl IndexArgs {
    pub fn get_log_level(&self) -> &'static str {
        verbosity_level(self.verbose)
    }

    pub fn to_config(&self) -> IndexConfig {
        IndexConfig {
            input_path: self.input_json.clone(),
            output_path: self.output_json.clone(),
            precision: self.precision,
            compact: self.compact,
        }
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive used when `RUST_LOG` is unset
pub fn default_log_directive(log_level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), log_level)
}

/// Set up structured logging on stderr; `RUST_LOG` overrides `log_level`.
///
/// `compact` drops the uptime column and uses the one-line format.
pub fn setup_logging(log_level: &str, compact: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(log_level)));

    let compact_layer = compact.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
    });
    let timed_layer = (!compact).then(|| {
        fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact_layer)
        .with(timed_layer)
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

pub fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Reconciliation Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} geo, {} postal",
        "Files read:".bright_cyan(),
        stats.geo_files,
        stats.postal_files
    );
    println!(
        "  {} {} of {} kept",
        "Places:".bright_cyan(),
        stats.place_rows_kept.to_string().bright_white(),
        stats.place_rows_loaded
    );
    println!(
        "  {} {}",
        "Postal codes:".bright_cyan(),
        stats.postal_rows_loaded.to_string().bright_white()
    );
    println!(
        "  {} {} ({:.1}%)",
        "Matched rows:".bright_cyan(),
        stats.join.matched_rows.to_string().bright_white().bold(),
        stats.join.match_rate()
    );

    let unmatched = stats.join.postal_only_rows + stats.join.place_only_rows;
    if unmatched > 0 {
        println!(
            "  {} {} postal only, {} place only",
            "Unmatched rows:".bright_yellow(),
            stats.join.postal_only_rows,
            stats.join.place_only_rows
        );
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        stats.output_rows.to_string().bright_white().bold()
    );
    println!("  {} {}", "Output:".bright_cyan(), stats.output_path.display());
}

/// Indexer stats go to stderr so stdout stays clean for redirection
pub fn print_index_summary(stats: &IndexStats, config: &IndexConfig) {
    eprintln!("{}", stats);
    eprintln!("Wrote: {}", config.output_path.display());
}
