use std::fs;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Immediate children of a directory, split into files and subdirectories,
/// each group in ordinal name order.
///
/// Children are joined onto the canonical form of the listed directory, so
/// following a symlink cycle never builds a path with more than one link to
/// resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

impl DirectoryListing {
    pub fn read(path: &Path) -> Result<Self, ListingError> {
        let mut listing = Self::default();
        let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        for entry in fs::read_dir(&resolved).context(ReadDirSnafu { path })? {
            let entry_path = entry.context(ReadDirSnafu { path })?.path();
            // Symlinks to directories count as directories.
            if entry_path.is_dir() {
                listing.directories.push(entry_path);
            } else {
                listing.files.push(entry_path);
            }
        }

        listing.files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        listing
            .directories
            .sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(
            "Listed {}: {} files, {} directories",
            path.best_effort_path_display(),
            listing.files.len(),
            listing.directories.len()
        );
        Ok(listing)
    }

    pub fn child_count(&self) -> u64 {
        (self.files.len() + self.directories.len()) as u64
    }
}

#[derive(Debug, Snafu)]
pub enum ListingError {
    #[snafu(display("Failed to list directory {}", path.best_effort_path_display()))]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn splits_files_and_directories_in_name_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        for file in ["b.txt", "a.txt", "c"] {
            fs::write(root.join(file), "").expect("Failed to write file");
        }
        for directory in ["zeta", "alpha"] {
            fs::create_dir(root.join(directory)).expect("Failed to create directory");
        }

        let listing = DirectoryListing::read(root).expect("Failed to list directory");

        let names = |paths: &[PathBuf]| {
            paths
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&listing.files), ["a.txt", "b.txt", "c"]);
        assert_eq!(names(&listing.directories), ["alpha", "zeta"]);
        assert_eq!(listing.child_count(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn children_of_a_symlinked_directory_hang_off_its_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create target");
        std::os::unix::fs::symlink(&target, target.join("loop")).expect("Failed to create symlink");

        let through_link = target.join("loop").join("loop").join("loop");
        let listing = DirectoryListing::read(&through_link).expect("Failed to list directory");

        let canonical_target = fs::canonicalize(&target).expect("canonicalize");
        assert_eq!(listing.directories, [canonical_target.join("loop")]);
        assert!(listing.files.is_empty());
    }

    #[test]
    fn empty_directory_has_no_children() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let listing = DirectoryListing::read(temp_dir.path()).expect("Failed to list directory");

        assert_eq!(listing, DirectoryListing::default());
        assert_eq!(listing.child_count(), 0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = DirectoryListing::read(Path::new("/this/path/does/not/exist"));

        match result {
            Err(ListingError::ReadDirError { path, .. }) => {
                assert_eq!(path, Path::new("/this/path/does/not/exist"));
            }
            other => panic!("Expected ReadDirError, got {other:?}"),
        }
    }

    #[test]
    fn listing_error_mentions_the_path() {
        let error = DirectoryListing::read(Path::new("/this/path/does/not/exist"))
            .expect_err("Listing should fail");

        assert!(error.to_string().starts_with("Failed to list directory"));
        assert!(error.to_string().contains("exist"));
    }
}
