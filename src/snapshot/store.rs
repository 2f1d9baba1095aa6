use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};
use snafu::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, error};

use crate::ext::BestEffortPathExt;
use crate::snapshot::ordering::NameOrdering;
use crate::snapshot::snapshot::{Snapshot, SnapshotEntry};

pub const DEFAULT_SNAPSHOT_FILE: &str = "data.dat";

const FORMAT_VERSION: u32 = 1;
const COMPRESSION_LEVEL: i32 = 3;

/// On-disk layout: a bincode record compressed with zstd.
#[derive(Debug, Encode, Decode)]
struct SnapshotRecord {
    version: u32,
    entries: Vec<SnapshotEntry>,
}

/// Persists snapshots to, and reloads them from, a single artifact file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes `snapshot` next to the destination first and renames it into
    /// place, so a failure never leaves a truncated artifact.
    pub fn persist<O: NameOrdering>(
        &self,
        snapshot: &Snapshot<O>,
    ) -> Result<(), SnapshotStoreError> {
        let record = SnapshotRecord {
            version: FORMAT_VERSION,
            entries: snapshot.iter().cloned().collect(),
        };
        let encoded =
            bincode::encode_to_vec(&record, bincode::config::standard()).context(EncodeSnafu)?;
        let compressed =
            zstd::encode_all(encoded.as_slice(), COMPRESSION_LEVEL).context(CompressSnafu)?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(directory).context(WriteSnafu {
            path: self.path.clone(),
        })?;
        file.write_all(&compressed).context(WriteSnafu {
            path: self.path.clone(),
        })?;
        file.as_file().sync_all().context(WriteSnafu {
            path: self.path.clone(),
        })?;
        file.persist(&self.path).context(PersistSnafu {
            path: self.path.clone(),
        })?;

        debug!(
            "Persisted {} snapshot entries ({} bytes) to {}",
            record.entries.len(),
            compressed.len(),
            self.path.best_effort_path_display()
        );
        Ok(())
    }

    pub fn load<O: NameOrdering>(&self) -> Result<Snapshot<O>, SnapshotStoreError> {
        let compressed = fs::read(&self.path).context(ReadSnafu {
            path: self.path.clone(),
        })?;
        let encoded = zstd::decode_all(compressed.as_slice()).context(DecompressSnafu {
            path: self.path.clone(),
        })?;
        let (record, _): (SnapshotRecord, usize) =
            bincode::decode_from_slice(&encoded, bincode::config::standard()).context(
                DecodeSnafu {
                    path: self.path.clone(),
                },
            )?;
        ensure!(
            record.version == FORMAT_VERSION,
            UnsupportedVersionSnafu {
                path: self.path.clone(),
                version: record.version,
            }
        );

        debug!(
            "Loaded {} snapshot entries from {}",
            record.entries.len(),
            self.path.best_effort_path_display()
        );
        Ok(record
            .entries
            .into_iter()
            .map(|entry| (entry.name, entry.value))
            .collect())
    }

    /// Like [`load`](Self::load), but logs the failure and falls back to an
    /// empty snapshot.
    pub fn load_or_empty<O: NameOrdering>(&self) -> Snapshot<O> {
        self.load().unwrap_or_else(|err| {
            error!("Failed to deserialize: {}", snafu::Report::from_error(err));
            Snapshot::new()
        })
    }
}

#[derive(Debug, Snafu)]
pub enum SnapshotStoreError {
    #[snafu(display("Failed to encode the snapshot"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Failed to compress the snapshot"))]
    CompressError { source: std::io::Error },
    #[snafu(display("Failed to write snapshot file {}", path.best_effort_path_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to move snapshot into place at {}", path.best_effort_path_display()))]
    PersistError {
        path: PathBuf,
        source: tempfile::PersistError,
    },
    #[snafu(display("Failed to read snapshot file {}", path.best_effort_path_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Snapshot file {} is not zstd compressed", path.best_effort_path_display()))]
    DecompressError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Snapshot file {} is malformed", path.best_effort_path_display()))]
    DecodeError {
        path: PathBuf,
        source: bincode::error::DecodeError,
    },
    #[snafu(display(
        "Snapshot file {} has unsupported format version {version}",
        path.best_effort_path_display()
    ))]
    UnsupportedVersionError { path: PathBuf, version: u32 },
}
