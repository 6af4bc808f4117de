//! Unit tests for the CLI commands and map loading helpers.

use super::commands::{derive_map_name, load_navigator, parse_timeout};
use super::test_helpers::{CAMPUS, create_map_file, map_args, run_cli_expecting_error, temp_dir};
use super::{
    Cli, CliError, Command, CommandOutcome, LocateCommand, NearestCommand, RouteCommand,
    SearchCommand, Waypoint, render_summary, run_cli,
};

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use wayfinder_core::{SolverOutcome, StreetMapError, StreetMapErrorCode};
use wayfinder_providers_text::TextMapError;
use wayfinder_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const EDGE_METRES: f64 = 1_111.949_266;

fn route(path: &Path, from: (f64, f64), to: (f64, f64), timeout: Duration) -> Cli {
    Cli {
        command: Command::Route(RouteCommand {
            map: map_args(path.to_path_buf()),
            from_lon: from.0,
            from_lat: from.1,
            to_lon: to.0,
            to_lat: to.1,
            timeout,
        }),
    }
}

#[rstest]
#[case::override_name("/tmp/berkeley.map", Some("override"), "override")]
#[case::stem_with_extension("/tmp/berkeley.map", None, "berkeley")]
#[case::stem_without_extension("/tmp/berkeley", None, "berkeley")]
#[case::missing_stem("", None, "map")]
fn derive_map_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    assert_eq!(derive_map_name(Path::new(raw_path), override_name), expected);
}

#[rstest]
#[case("10", Duration::from_secs(10))]
#[case(" 0.25 ", Duration::from_millis(250))]
#[case("0", Duration::ZERO)]
fn parse_timeout_accepts_seconds(#[case] raw: &str, #[case] expected: Duration) {
    assert_eq!(parse_timeout(raw), Ok(expected));
}

#[rstest]
#[case("soon")]
#[case("-1")]
#[case("NaN")]
#[case("inf")]
fn parse_timeout_rejects_invalid_values(#[case] raw: &str) {
    let err = parse_timeout(raw).expect_err("value must be rejected");
    assert!(err.contains(raw.trim()), "message `{err}` must quote the input");
}

#[rstest]
fn clap_parses_negative_coordinates() -> TestResult {
    let cli = Cli::try_parse_from([
        "wayfinder",
        "route",
        "--map",
        "berkeley.map",
        "--from-lon",
        "-122.2592",
        "--from-lat",
        "37.8722",
        "--to-lon",
        "-122.2520",
        "--to-lat",
        "37.8697",
    ])?;
    let Command::Route(command) = cli.command else {
        panic!("route subcommand expected");
    };
    assert_eq!(command.from_lon, -122.2592);
    assert_eq!(command.to_lat, 37.8697);
    assert_eq!(command.timeout, Duration::from_secs(10));
    assert_eq!(command.map.map, Path::new("berkeley.map"));
    Ok(())
}

#[rstest]
fn clap_rejects_invalid_timeout() {
    let result = Cli::try_parse_from([
        "wayfinder",
        "route",
        "--map",
        "m.map",
        "--from-lon",
        "0",
        "--from-lat",
        "0",
        "--to-lon",
        "1",
        "--to-lat",
        "1",
        "--timeout-secs",
        "forever",
    ]);
    assert!(result.is_err());
}

#[rstest]
fn route_follows_the_shortest_streets() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let summary = run_cli(route(&path, (0.0, 0.01), (0.02, 0.0), Duration::from_secs(5)))?;
    assert_eq!(summary.map, "campus");

    let CommandOutcome::Route { report, waypoints } = summary.outcome else {
        panic!("route outcome expected");
    };
    assert_eq!(report.outcome(), SolverOutcome::Solved);
    assert_eq!(report.solution(), [4, 1, 2, 3]);
    assert!((report.solution_weight() - 3.0 * EDGE_METRES).abs() < 1e-3);
    assert_eq!(
        waypoints.first(),
        Some(&Waypoint {
            id: 4,
            lon: 0.0,
            lat: 0.01
        })
    );
    assert_eq!(waypoints.len(), 4);
    Ok(())
}

#[rstest]
fn route_reports_disconnected_streets_as_unsolvable() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(
        &dir,
        "islands.map",
        "node 1 0 0\nnode 2 0.01 0\nnode 3 1 1\nnode 4 1.01 1\nway 1 2\nway 3 4\n",
    )?;
    let summary = run_cli(route(&path, (0.0, 0.0), (1.01, 1.0), Duration::from_secs(5)))?;
    let CommandOutcome::Route { report, waypoints } = summary.outcome else {
        panic!("route outcome expected");
    };
    assert_eq!(report.outcome(), SolverOutcome::Unsolvable);
    assert_eq!(report.states_explored(), 2);
    assert!(waypoints.is_empty());
    Ok(())
}

#[rstest]
fn route_rejects_zero_timeout() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let err = run_cli_expecting_error(
        route(&path, (0.0, 0.0), (0.02, 0.0), Duration::ZERO),
        "zero timeout must be rejected",
    );
    assert!(matches!(
        err,
        CliError::Navigation(StreetMapError::InvalidTimeout)
    ));
    assert_eq!(
        err.street_map_error().map(StreetMapError::code),
        Some(StreetMapErrorCode::InvalidTimeout)
    );
    Ok(())
}

#[rstest]
#[case::on_a_vertex((0.011, 0.016), 5)]
#[case::isolated_vertices_are_skipped((0.05, 0.05), 5)]
#[case::between_vertices((0.014, 0.001), 2)]
fn nearest_snaps_to_routable_vertices(
    #[case] query: (f64, f64),
    #[case] expected: u64,
) -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let summary = run_cli(Cli {
        command: Command::Nearest(NearestCommand {
            map: map_args(path),
            lon: query.0,
            lat: query.1,
        }),
    })?;
    let CommandOutcome::Nearest(waypoint) = summary.outcome else {
        panic!("nearest outcome expected");
    };
    assert_eq!(waypoint.id, expected);
    Ok(())
}

#[rstest]
#[case::shared_prefix("to", &["Tolman Hall", "Top Dog"])]
#[case::punctuation_ignored("TOP-", &["Top Dog"])]
#[case::isolated_vertex("sath", &["Sather Tower"])]
#[case::no_match("zz", &[])]
fn search_lists_matching_names(#[case] prefix: &str, #[case] expected: &[&str]) -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let summary = run_cli(Cli {
        command: Command::Search(SearchCommand {
            map: map_args(path),
            prefix: prefix.to_owned(),
        }),
    })?;
    let expected: Vec<String> = expected.iter().map(|name| (*name).to_owned()).collect();
    assert_eq!(summary.outcome, CommandOutcome::Search(expected));
    Ok(())
}

#[rstest]
fn locate_lists_every_vertex_with_the_name() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let summary = run_cli(Cli {
        command: Command::Locate(LocateCommand {
            map: map_args(path),
            name: "top dog".to_owned(),
        }),
    })?;
    let CommandOutcome::Locate(locations) = summary.outcome else {
        panic!("locate outcome expected");
    };
    let found: Vec<(u64, &str)> = locations
        .iter()
        .map(|location| (location.id(), location.name()))
        .collect();
    assert_eq!(found, [(3, "Top Dog"), (5, "TOP DOG!")]);
    Ok(())
}

#[rstest]
fn missing_map_reports_io_error() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.map");
    let err = run_cli_expecting_error(
        route(&missing, (0.0, 0.0), (1.0, 1.0), Duration::from_secs(1)),
        "missing map must fail",
    );
    assert!(matches!(err, CliError::Io { ref path, .. } if path == &missing));
    assert!(err.street_map_error().is_none());
}

#[rstest]
fn malformed_map_reports_line() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "broken.map", "node 1 0 0\nnode 2 east 0\n")?;
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Search(SearchCommand {
                map: map_args(path),
                prefix: "a".to_owned(),
            }),
        },
        "malformed map must fail",
    );
    assert!(matches!(
        err,
        CliError::Text(TextMapError::Malformed { line: 2, .. })
    ));
    Ok(())
}

#[rstest]
fn map_conflicts_expose_street_map_code() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "dangling.map", "node 1 0 0\nway 1 7\n")?;
    let err = load_navigator(&map_args(path), Duration::from_secs(1))
        .expect_err("dangling way must fail");
    assert_eq!(
        err.street_map_error(),
        Some(&StreetMapError::UnknownNode { id: 7 })
    );
    Ok(())
}

#[rstest]
fn render_summary_outputs_route() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let summary = run_cli(route(&path, (0.0, 0.01), (0.02, 0.0), Duration::from_secs(5)))?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let rendered = String::from_utf8(buffer)?;
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.first(), Some(&"map: campus"));
    assert_eq!(lines.get(1), Some(&"outcome: solved"));
    assert!(lines.contains(&"distance_m: 3335.848"));
    assert!(lines.contains(&"vertices: 4"));
    assert_eq!(lines.last(), Some(&"3\t3\t0.02\t0"));
    Ok(())
}

#[rstest]
fn render_summary_outputs_nearest() -> TestResult {
    let summary = super::ExecutionSummary {
        map: "campus".to_owned(),
        outcome: CommandOutcome::Nearest(Waypoint {
            id: 5,
            lon: 0.01,
            lat: 0.015,
        }),
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "map: campus\nnearest: 5\t0.01\t0.015\n"
    );
    Ok(())
}

#[rstest]
fn run_cli_emits_tracing_fields() -> TestResult {
    let dir = temp_dir();
    let path = create_map_file(&dir, "campus.map", CAMPUS)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let cli = route(&path, (0.0, 0.01), (0.02, 0.0), Duration::from_secs(5));
    let summary = tracing::subscriber::with_default(subscriber, || run_cli(cli))?;
    assert_eq!(summary.map, "campus");

    let run = layer.span("cli.run").expect("cli.run span must exist");
    assert_eq!(run.field("command"), Some("route"));

    let route_span = layer.span("cli.route").expect("cli.route span must exist");
    assert_eq!(route_span.field("outcome"), Some("solved"));
    assert!(route_span.field("explored").is_some());

    let load = layer.span("cli.load_map").expect("cli.load_map span must exist");
    assert!(load.field("path").is_some_and(|value| value.ends_with("campus.map")));
    assert_eq!(load.field("override_name"), Some("<derived>"));
    assert_eq!(load.field("vertices"), Some("6"));

    assert!(layer.has_event(Level::INFO, "map loaded"));
    assert!(layer.events().iter().any(|event| {
        event.level == Level::INFO
            && event.message() == Some("route found")
            && event.field("vertices") == Some("4")
    }));
    Ok(())
}

#[rstest]
fn open_map_reader_records_path_on_error() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.map");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let cli = Cli {
        command: Command::Search(SearchCommand {
            map: map_args(missing),
            prefix: "top".to_owned(),
        }),
    };
    let err = tracing::subscriber::with_default(subscriber, || run_cli(cli))
        .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));

    let reader = layer
        .span("cli.open_map_reader")
        .expect("reader span must exist");
    assert!(reader.field("path").is_some_and(|value| value.ends_with("missing.map")));
    let search = layer.span("cli.search").expect("search span must exist");
    assert_eq!(search.field("prefix"), Some("top"));
    assert!(layer.events().iter().any(|event| event.level == Level::ERROR));
}
