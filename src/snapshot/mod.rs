//! One-level directory snapshots.
//!
//! A snapshot maps the names of a directory's immediate children to their
//! byte length (files) or child count (directories), ordered by a pluggable
//! `NameOrdering`. The store writes it as a zstd-compressed bincode record
//! and reads it back.

mod ordering;
#[allow(clippy::module_inception)]
mod snapshot;
mod store;

pub use snapshot::Snapshot;
pub use store::{DEFAULT_SNAPSHOT_FILE, SnapshotStore};
