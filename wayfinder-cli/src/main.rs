//! CLI entry point for wayfinder.
//!
//! Parses command-line arguments with clap, loads the requested street map,
//! answers the query, renders the summary to stdout, and maps errors to exit
//! codes. Logging is initialised eagerly so subsequent operations can emit
//! structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tracing::{error, field};
use wayfinder_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

/// Parse CLI arguments, execute the command, render the summary, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let street_map = err
            .downcast_ref::<CliError>()
            .and_then(CliError::street_map_error);
        let code = street_map.map(|inner| field::display(inner.code().as_str()));
        let spatial_code = street_map
            .and_then(|inner| inner.spatial_code())
            .map(|code| field::display(code.as_str()));
        let search_code = street_map
            .and_then(|inner| inner.search_code())
            .map(|code| field::display(code.as_str()));

        error!(
            error = %err,
            code = code,
            spatial_code = spatial_code,
            search_code = search_code,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
