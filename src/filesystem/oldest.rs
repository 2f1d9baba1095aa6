use std::path::Path;
use std::time::SystemTime;

use derive_more::Display;
use tracing::{debug, warn};

use crate::ext::{BestEffortPathExt, SystemTimeExt};
use crate::filesystem::listing::DirectoryListing;
use crate::filesystem::tree::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OldestFileReport {
    #[display("The oldest file is here since: {}", _0.to_utc_timestamp())]
    Found(SystemTime),
    #[display("There are no files here!")]
    Empty,
}

impl From<Option<SystemTime>> for OldestFileReport {
    fn from(oldest: Option<SystemTime>) -> Self {
        oldest.map_or(OldestFileReport::Empty, OldestFileReport::Found)
    }
}

/// Finds the earliest creation time among all files below a directory,
/// descending at most `max_depth` levels like the tree printer does.
#[derive(Debug, Clone, Copy)]
pub struct OldestFileFinder {
    max_depth: usize,
}

impl Default for OldestFileFinder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl OldestFileFinder {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn find(&self, path: &Path) -> Option<SystemTime> {
        if !path.is_dir() {
            return None;
        }
        self.find_at(path, 1)
    }

    fn find_at(&self, path: &Path, depth: usize) -> Option<SystemTime> {
        if depth > self.max_depth {
            return None;
        }

        let listing = DirectoryListing::read(path)
            .map_err(|err| warn!("{}", snafu::Report::from_error(err)))
            .ok()?;

        let oldest_file = listing.files.iter().filter_map(|file| creation_time(file));
        let oldest_nested = listing
            .directories
            .iter()
            .filter_map(|directory| self.find_at(directory, depth + 1));

        oldest_file.chain(oldest_nested).min()
    }
}

/// Creation time where the platform records one, modification time otherwise.
fn creation_time(path: &Path) -> Option<SystemTime> {
    let metadata = path.metadata().ok()?;
    metadata
        .created()
        .or_else(|err| {
            debug!(
                "No creation time for {} ({err}), using modification time",
                path.best_effort_path_display()
            );
            metadata.modified()
        })
        .ok()
}
