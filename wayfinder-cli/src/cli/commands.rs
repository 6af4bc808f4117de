//! Command implementations and argument parsing for the wayfinder CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use wayfinder_core::{
    Location, Navigator, NavigatorBuilder, SearchReport, SolverOutcome, StreetMap,
    StreetMapError, VertexId,
    streetmap::DEFAULT_TIMEOUT,
};
use wayfinder_providers_text::{TextMapError, TextMapProvider};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "wayfinder",
    about = "Route between positions and look up places on a street map."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Find the shortest route between two positions.
    Route(RouteCommand),
    /// Find the routable vertex closest to a position.
    Nearest(NearestCommand),
    /// List location names starting with a prefix.
    Search(SearchCommand),
    /// List every location with a given name.
    Locate(LocateCommand),
}

/// Map input shared by every command.
#[derive(Debug, Args, Clone)]
pub struct MapArgs {
    /// Path to a text street map.
    #[arg(long)]
    pub map: PathBuf,

    /// Override name for the map (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `route` command.
#[derive(Debug, Args, Clone)]
pub struct RouteCommand {
    /// Map to route over.
    #[command(flatten)]
    pub map: MapArgs,

    /// Longitude of the starting position.
    #[arg(long, allow_negative_numbers = true)]
    pub from_lon: f64,

    /// Latitude of the starting position.
    #[arg(long, allow_negative_numbers = true)]
    pub from_lat: f64,

    /// Longitude of the destination.
    #[arg(long, allow_negative_numbers = true)]
    pub to_lon: f64,

    /// Latitude of the destination.
    #[arg(long, allow_negative_numbers = true)]
    pub to_lat: f64,

    /// Search time limit in seconds.
    #[arg(
        long = "timeout-secs",
        default_value = "10",
        value_parser = parse_timeout,
    )]
    pub timeout: Duration,
}

/// Options accepted by the `nearest` command.
#[derive(Debug, Args, Clone)]
pub struct NearestCommand {
    /// Map to search.
    #[command(flatten)]
    pub map: MapArgs,

    /// Longitude of the query position.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Latitude of the query position.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
}

/// Options accepted by the `search` command.
#[derive(Debug, Args, Clone)]
pub struct SearchCommand {
    /// Map to search.
    #[command(flatten)]
    pub map: MapArgs,

    /// Name prefix; case and punctuation are ignored.
    pub prefix: String,
}

/// Options accepted by the `locate` command.
#[derive(Debug, Args, Clone)]
pub struct LocateCommand {
    /// Map to search.
    #[command(flatten)]
    pub map: MapArgs,

    /// Location name; case and punctuation are ignored.
    pub name: String,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the map.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The map file could not be parsed.
    #[error(transparent)]
    Text(#[from] TextMapError),
    /// Building the navigator or answering the query failed.
    #[error(transparent)]
    Navigation(#[from] StreetMapError),
}

impl CliError {
    /// Returns the street map error behind this failure, whether it came from
    /// loading the map or from answering the query.
    #[must_use]
    pub const fn street_map_error(&self) -> Option<&StreetMapError> {
        match self {
            Self::Navigation(error) | Self::Text(TextMapError::Map { source: error, .. }) => {
                Some(error)
            }
            _ => None,
        }
    }
}

/// A vertex on a reported route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Vertex identifier.
    pub id: VertexId,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

/// Command-specific result carried by [`ExecutionSummary`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Result of the `route` command.
    Route {
        /// Search report with vertex identifiers.
        report: SearchReport<VertexId>,
        /// Route vertices with their coordinates.
        waypoints: Vec<Waypoint>,
    },
    /// Result of the `nearest` command.
    Nearest(Waypoint),
    /// Result of the `search` command: matching display names.
    Search(Vec<String>),
    /// Result of the `locate` command.
    Locate(Vec<Location>),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Name of the loaded map.
    pub map: String,
    /// Command-specific result.
    pub outcome: CommandOutcome,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the map or answering the query fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::time::Duration;
/// # use wayfinder_cli::cli::{Cli, Command, CommandOutcome, MapArgs, RouteCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     "node 1 0 0\nnode 2 0.01 0\nnode 3 0.02 0\nway 1 2 3\n",
/// )?;
/// let cli = Cli {
///     command: Command::Route(RouteCommand {
///         map: MapArgs { map: file.path().to_path_buf(), name: None },
///         from_lon: 0.0,
///         from_lat: 0.0,
///         to_lon: 0.02,
///         to_lat: 0.0,
///         timeout: Duration::from_secs(1),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let CommandOutcome::Route { report, .. } = summary.outcome else {
///     panic!("route command must report a route");
/// };
/// assert_eq!(report.solution(), [1, 2, 3]);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Route(command) => {
            span.record("command", field::display("route"));
            run_route(command)
        }
        Command::Nearest(command) => {
            span.record("command", field::display("nearest"));
            run_nearest(command)
        }
        Command::Search(command) => {
            span.record("command", field::display("search"));
            run_search(command)
        }
        Command::Locate(command) => {
            span.record("command", field::display("locate"));
            run_locate(command)
        }
    }
}

#[instrument(
    name = "cli.route",
    err,
    skip(command),
    fields(outcome = field::Empty, explored = field::Empty),
)]
pub(super) fn run_route(command: RouteCommand) -> Result<ExecutionSummary, CliError> {
    let RouteCommand {
        map,
        from_lon,
        from_lat,
        to_lon,
        to_lat,
        timeout,
    } = command;
    let (name, navigator) = load_navigator(&map, timeout)?;
    let report = navigator.route((from_lon, from_lat), (to_lon, to_lat))?;

    let span = Span::current();
    span.record("outcome", field::display(report.outcome()));
    span.record("explored", report.states_explored());
    if report.outcome() == SolverOutcome::Solved {
        info!(
            map = name.as_str(),
            vertices = report.solution().len(),
            weight = report.solution_weight(),
            elapsed = ?report.exploration_time(),
            "route found"
        );
    }

    let waypoints = report
        .solution()
        .iter()
        .filter_map(|id| waypoint(navigator.map(), *id))
        .collect();
    Ok(ExecutionSummary {
        map: name,
        outcome: CommandOutcome::Route { report, waypoints },
    })
}

#[instrument(name = "cli.nearest", err, skip(command), fields(vertex = field::Empty))]
pub(super) fn run_nearest(command: NearestCommand) -> Result<ExecutionSummary, CliError> {
    let NearestCommand { map, lon, lat } = command;
    let (name, navigator) = load_navigator(&map, DEFAULT_TIMEOUT)?;
    let id = navigator.closest(lon, lat)?;
    Span::current().record("vertex", id);
    let nearest = waypoint(navigator.map(), id).ok_or(StreetMapError::UnknownNode { id })?;
    Ok(ExecutionSummary {
        map: name,
        outcome: CommandOutcome::Nearest(nearest),
    })
}

#[instrument(
    name = "cli.search",
    err,
    skip(command),
    fields(prefix = %command.prefix, matches = field::Empty),
)]
pub(super) fn run_search(command: SearchCommand) -> Result<ExecutionSummary, CliError> {
    let SearchCommand { map, prefix } = command;
    let (name, navigator) = load_navigator(&map, DEFAULT_TIMEOUT)?;
    let names = navigator.locations_by_prefix(&prefix);
    Span::current().record("matches", names.len());
    Ok(ExecutionSummary {
        map: name,
        outcome: CommandOutcome::Search(names),
    })
}

#[instrument(
    name = "cli.locate",
    err,
    skip(command),
    fields(query = %command.name, matches = field::Empty),
)]
pub(super) fn run_locate(command: LocateCommand) -> Result<ExecutionSummary, CliError> {
    let LocateCommand { map, name: query } = command;
    let (name, navigator) = load_navigator(&map, DEFAULT_TIMEOUT)?;
    let locations = navigator.locations(&query);
    Span::current().record("matches", locations.len());
    Ok(ExecutionSummary {
        map: name,
        outcome: CommandOutcome::Locate(locations),
    })
}

#[instrument(
    name = "cli.load_map",
    err,
    skip(args),
    fields(path = field::Empty, override_name = field::Empty, vertices = field::Empty),
)]
pub(super) fn load_navigator(
    args: &MapArgs,
    timeout: Duration,
) -> Result<(String, Navigator), CliError> {
    let span = Span::current();
    span.record("path", field::display(args.map.display()));
    span.record(
        "override_name",
        field::display(args.name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_map_name(&args.map, args.name.as_deref());
    let reader = open_map_reader(&args.map)?;
    let provider = TextMapProvider::try_from_reader(chosen_name, reader)?;
    span.record("vertices", provider.map().len());
    let name = provider.name().to_owned();
    let navigator = NavigatorBuilder::new()
        .with_timeout(timeout)
        .build(provider.into_map())?;
    info!(
        map = name.as_str(),
        routable = navigator.routable_positions(),
        "map loaded"
    );
    Ok((name, navigator))
}

#[instrument(name = "cli.open_map_reader", err, fields(path = field::Empty))]
pub(super) fn open_map_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_map_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "map".to_owned(), ToOwned::to_owned)
}

pub(super) fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("`{raw}` is not a number of seconds: {err}"))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|err| format!("`{raw}` is not a valid timeout: {err}"))
}

fn waypoint(map: &StreetMap, id: VertexId) -> Option<Waypoint> {
    map.node(id).map(|node| Waypoint {
        id,
        lon: node.lon(),
        lat: node.lat(),
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use wayfinder_cli::cli::{CommandOutcome, ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     map: "campus".into(),
///     outcome: CommandOutcome::Search(vec!["Top Dog".into(), "Tolman Hall".into()]),
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer.into_inner())?,
///     "map: campus\nmatches: 2\nTop Dog\nTolman Hall\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "map: {}", summary.map)?;
    match &summary.outcome {
        CommandOutcome::Route { report, waypoints } => {
            writeln!(writer, "outcome: {}", report.outcome())?;
            writeln!(writer, "explored: {}", report.states_explored())?;
            if report.outcome() == SolverOutcome::Solved {
                writeln!(writer, "distance_m: {:.3}", report.solution_weight())?;
                writeln!(writer, "vertices: {}", waypoints.len())?;
                for (index, stop) in waypoints.iter().enumerate() {
                    writeln!(writer, "{index}\t{}\t{}\t{}", stop.id, stop.lon, stop.lat)?;
                }
            }
        }
        CommandOutcome::Nearest(stop) => {
            writeln!(writer, "nearest: {}\t{}\t{}", stop.id, stop.lon, stop.lat)?;
        }
        CommandOutcome::Search(names) => {
            writeln!(writer, "matches: {}", names.len())?;
            for name in names {
                writeln!(writer, "{name}")?;
            }
        }
        CommandOutcome::Locate(locations) => {
            writeln!(writer, "matches: {}", locations.len())?;
            for location in locations {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    location.id(),
                    location.lon(),
                    location.lat(),
                    location.name()
                )?;
            }
        }
    }
    Ok(())
}
