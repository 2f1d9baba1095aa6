//! Reading directory trees from disk.
//!
//! Entries are always read fresh from the filesystem: the attribute reader
//! decodes the `rhas` flags of a single entry, the tree printer walks a
//! directory depth-first and the oldest file finder reports the earliest
//! creation time below a directory.

mod attributes;
mod listing;
mod oldest;
mod tree;

pub use attributes::file_size;
pub use listing::{DirectoryListing, ListingError};
pub use oldest::{OldestFileFinder, OldestFileReport};
pub use tree::{DEFAULT_MAX_DEPTH, TreePrintError, TreePrinter};
