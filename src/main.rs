mod args;
mod commands;
mod shared;

use args::Cli;
use clap::Parser;
use commands::run_alarm;
use std::process::ExitCode;

// Top-level entrypoint: parse CLI args, run the alarm, and map the result to an exit status.
// Cancelling the wait and stopping the ringing are both normal exits.
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = shared::logging::init() {
        eprintln!("logging unavailable: {err}");
    }

    match run_alarm(cli) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "alarm finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error running alarm: {err:#}");
            ExitCode::FAILURE
        }
    }
}
