use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::filesystem::DEFAULT_MAX_DEPTH;
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory to explore; nothing is printed without one
    pub root: Option<PathBuf>,
    pub max_depth: usize,
    pub snapshot: bool,
    pub snapshot_file: PathBuf,
    pub oldest: bool,
    /// Wait for a keypress before exiting
    pub pause: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            root: None,
            max_depth: DEFAULT_MAX_DEPTH,
            snapshot: false,
            snapshot_file: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            oldest: false,
            pause: true,
        }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        if !cli.ignored.is_empty() {
            debug!("Ignoring extra arguments: {:?}", cli.ignored);
        }
        Self {
            root: cli.path,
            max_depth: cli.max_depth,
            snapshot: cli.snapshot,
            snapshot_file: cli.snapshot_file,
            oldest: cli.oldest,
            pause: !cli.no_pause,
        }
    }
}
