use std::marker::PhantomData;
use std::path::Path;

use bincode::{Decode, Encode};
use derive_more::Display;
use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{DirectoryListing, ListingError, file_size};
use crate::snapshot::ordering::{LengthThenLexical, NameOrdering};

/// One name and its value: a file's byte length or a directory's child count.
#[derive(Debug, Clone, PartialEq, Eq, Display, Encode, Decode)]
#[display("{name} -> {value}")]
pub struct SnapshotEntry {
    pub name: String,
    pub value: u64,
}

/// Ordered name -> value mapping of a single directory level.
///
/// Entries are kept sorted by `O` at all times. Inserting a name that is
/// already present replaces its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<O: NameOrdering = LengthThenLexical> {
    entries: Vec<SnapshotEntry>,
    ordering: PhantomData<O>,
}

impl<O: NameOrdering> Default for Snapshot<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            ordering: PhantomData,
        }
    }
}

impl<O: NameOrdering> Snapshot<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the immediate files (name -> byte length) and subdirectories
    /// (name -> child count) of `path`.
    pub fn build(path: &Path) -> Result<Self, SnapshotBuildError> {
        let listing = DirectoryListing::read(path).context(ListingSnafu)?;
        let mut snapshot = Self::new();

        for file in &listing.files {
            snapshot.insert(file.entry_display_name(), file_size(file));
        }
        for directory in &listing.directories {
            let child_count = match DirectoryListing::read(directory) {
                Ok(sublisting) => sublisting.child_count(),
                Err(err) => {
                    warn!("{}", snafu::Report::from_error(err));
                    0
                }
            };
            snapshot.insert(directory.entry_display_name(), child_count);
        }

        debug!(
            "Built snapshot of {} with {} entries",
            path.best_effort_path_display(),
            snapshot.len()
        );
        Ok(snapshot)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: u64) -> Option<u64> {
        let name = name.into();
        match self
            .entries
            .binary_search_by(|entry| O::compare(&entry.name, &name))
        {
            Ok(index) => Some(std::mem::replace(&mut self.entries[index].value, value)),
            Err(index) => {
                self.entries.insert(index, SnapshotEntry { name, value });
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.iter()
    }
}

impl<O: NameOrdering, N: Into<String>> FromIterator<(N, u64)> for Snapshot<O> {
    fn from_iter<I: IntoIterator<Item = (N, u64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, value) in iter {
            snapshot.insert(name, value);
        }
        snapshot
    }
}

#[derive(Debug, Snafu)]
pub enum SnapshotBuildError {
    #[snafu(display("Failed to build a snapshot"))]
    ListingError { source: ListingError },
}
