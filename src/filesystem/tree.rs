use std::io::Write;
use std::path::Path;

use derive_more::Display;
use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::attributes::{AttributeFlags, attributes, file_size};
use crate::filesystem::listing::DirectoryListing;

/// Deepest level entries are printed at unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

const INDENT: &str = "   ";

/// One printed line of the tree, without its indentation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EntryLine {
    #[display("{name} {size} bytes {flags}")]
    File {
        name: String,
        size: u64,
        flags: AttributeFlags,
    },
    #[display("{name} ({child_count}) {flags}")]
    Directory {
        name: String,
        child_count: u64,
        flags: AttributeFlags,
    },
}

impl EntryLine {
    pub fn file(path: &Path) -> Self {
        EntryLine::File {
            name: path.entry_display_name(),
            size: file_size(path),
            flags: attributes(path),
        }
    }

    pub fn directory(path: &Path, child_count: u64) -> Self {
        EntryLine::Directory {
            name: path.entry_display_name(),
            child_count,
            flags: attributes(path),
        }
    }
}

/// Depth-first, pre-order printer of a directory tree.
///
/// Files of a directory come before its subdirectories; every subdirectory
/// line is immediately followed by its own contents one level deeper.
/// Symlinked directories are followed, so a link cycle is only stopped by
/// `max_depth`.
pub struct TreePrinter<W: Write> {
    out: W,
    max_depth: usize,
}

impl<W: Write> TreePrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Prints `path` itself at depth 0, then its contents from depth 1.
    /// Does nothing when `path` is not an existing directory.
    pub fn print_root(&mut self, path: &Path) -> Result<(), TreePrintError> {
        if !path.is_dir() {
            debug!(
                "{} is not a directory, nothing to print",
                path.best_effort_path_display()
            );
            return Ok(());
        }

        let listing = read_listing(path);
        let child_count = listing.as_ref().map_or(0, DirectoryListing::child_count);
        self.write_line(0, &EntryLine::directory(path, child_count))?;

        match listing {
            Some(listing) => self.print_listing(path, &listing, 1),
            None => Ok(()),
        }
    }

    /// Prints the contents of `path` at `depth`. Does nothing when `path` is
    /// not an existing directory.
    pub fn print_tree(&mut self, path: &Path, depth: usize) -> Result<(), TreePrintError> {
        if !path.is_dir() {
            return Ok(());
        }
        match read_listing(path) {
            Some(listing) => self.print_listing(path, &listing, depth),
            None => Ok(()),
        }
    }

    fn print_listing(
        &mut self,
        path: &Path,
        listing: &DirectoryListing,
        depth: usize,
    ) -> Result<(), TreePrintError> {
        if depth > self.max_depth {
            warn!(
                "Not descending into {}: depth limit of {} reached",
                path.best_effort_path_display(),
                self.max_depth
            );
            return Ok(());
        }

        for file in &listing.files {
            self.write_line(depth, &EntryLine::file(file))?;
        }

        for directory in &listing.directories {
            let sublisting = read_listing(directory);
            let child_count = sublisting
                .as_ref()
                .map_or(0, DirectoryListing::child_count);
            self.write_line(depth, &EntryLine::directory(directory, child_count))?;

            if let Some(sublisting) = sublisting {
                self.print_listing(directory, &sublisting, depth + 1)?;
            }
        }

        Ok(())
    }

    fn write_line(&mut self, depth: usize, line: &EntryLine) -> Result<(), TreePrintError> {
        writeln!(self.out, "{}{line}", INDENT.repeat(depth)).context(WriteSnafu)
    }
}

fn read_listing(path: &Path) -> Option<DirectoryListing> {
    DirectoryListing::read(path)
        .map_err(|err| warn!("{}", snafu::Report::from_error(err)))
        .ok()
}

#[derive(Debug, Snafu)]
pub enum TreePrintError {
    #[snafu(display("Failed to write the directory tree"))]
    WriteError { source: std::io::Error },
}
