//! `gatherer`: export deduplicated Apollo contacts to CSV.
mod cli;
mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::initialize(
        engine_logging::level_for(cli.verbose, cli.quiet),
        cli.log_file.as_deref(),
    );

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
