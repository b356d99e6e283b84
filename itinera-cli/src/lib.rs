//! Command-line interface for the Itinera planner.
#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod plan;

pub use error::{CliError, EXIT_CLIENT_ERROR, EXIT_INTERNAL_ERROR};
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request-path";
pub(crate) const ARG_PLAN_OUTPUT: &str = "output";
pub(crate) const ARG_PLAN_RADIUS_KM: &str = "radius-km";
pub(crate) const ARG_PLAN_START_TIME: &str = "start-time";
pub(crate) const ARG_PLAN_END_TIME: &str = "end-time";
pub(crate) const ARG_PLAN_TRANSPORT_MODE: &str = "transport-mode";
pub(crate) const ENV_PLAN_REQUEST: &str = "ITINERA_CMDS_PLAN_REQUEST_PATH";

/// Run the Itinera CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.verbose)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "itinera",
    about = "Turn points of interest into a multi-day visit itinerary",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cluster POIs, order each cluster and pack the stops into days.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
