//! Amber Cart CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the terminal is the only place left to report to"
)]
fn report(error: &cli::CliError) {
    eprintln!("error: {error}");
}
