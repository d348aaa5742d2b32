use clap::Parser;
use geonames_processor::cli::{IndexArgs, print_index_summary, setup_logging};
use geonames_processor::geohash_index;
use std::process;

fn main() {
    let args = IndexArgs::parse();

    // the stats line is the tool's real output, so logs stay terse
    setup_logging(args.get_log_level(), true);

    let config = args.to_config();
    match geohash_index::run(&config) {
        Ok(stats) => {
            print_index_summary(&stats, &config);
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            process::exit(1);
        }
    }
}
