//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests write small street maps to temporary files and assert
//! error handling behaviour. These helpers keep the test cases concise.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, MapArgs, run_cli};

/// Three-street map: a straight road 1-2-3, a detour 1-4-5-2 and an isolated
/// named vertex 9.
pub(super) const CAMPUS: &str = "\
# campus fixture
node 1 0 0
node 2 0.01 0
node 3 0.02 0
node 4 0 0.01
node 5 0.01 0.015
node 9 0.05 0.05
way 1 2 3
way 1 4 5 2
name 3 Top Dog
name 5 TOP DOG!
name 4 Tolman Hall
name 9 Sather Tower
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_map_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn map_args(path: PathBuf) -> MapArgs {
    MapArgs {
        map: path,
        name: None,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
