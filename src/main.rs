use slot_planner::commands::{execute, parse_args};
use slot_planner::startup;
use std::process::ExitCode;
use tracing::info;

fn main() -> miette::Result<ExitCode> {
    // Initialize logging
    startup::init_logging()?;

    let command = parse_args(std::env::args().skip(1))?;

    // Load configuration
    let config = startup::load_config()?;

    let report = execute(&command, &config)?;
    println!("{}", report.output);

    // The report already explains a rejection, only the exit status is left
    match report.rejection {
        Some(rejection) => {
            info!(reason = rejection.code(), "Time slot request rejected");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
