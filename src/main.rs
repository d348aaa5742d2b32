use anyhow::Context;
use clap::Parser;
use geonames_processor::cli::{Args, print_summary, setup_logging};
use geonames_processor::processor::GazetteerProcessor;
use std::process;

fn main() {
    let args = Args::parse();

    setup_logging(args.get_log_level(), args.quiet);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Missing inputs are rejected here, before any file is opened
    let processor = GazetteerProcessor::new(args.to_config())?;

    let stats = processor
        .process()
        .with_context(|| format!("reconciliation into {} failed", processor.output_path().display()))?;

    if !args.quiet {
        print_summary(&stats);
    }
    Ok(())
}
