//! Command-line interface orchestration for wayfinder.
//!
//! Every command loads a text street map, builds a navigator over it and
//! answers one query: a route between two positions, the vertex nearest to a
//! position, the location names matching a prefix, or the locations carrying a
//! name.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandOutcome, ExecutionSummary, LocateCommand, MapArgs,
    NearestCommand, RouteCommand, SearchCommand, Waypoint, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
