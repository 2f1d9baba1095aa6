use std::io::{self, Read, Write};
use std::path::Path;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, error, info};

use crate::application::RuntimeConfig;
use crate::ext::BestEffortPathExt;
use crate::filesystem::{OldestFileFinder, OldestFileReport, TreePrintError, TreePrinter};
use crate::snapshot::{Snapshot, SnapshotStore};

pub struct Application;

impl Application {
    /// Lists the configured directory, then optionally reports the oldest file
    /// and runs the snapshot cycle. Failures are logged, never returned.
    pub fn run(app_config: impl Into<RuntimeConfig>) {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        if let Err(err) = Self::explore(&app_config, io::stdout().lock()) {
            error!("{}", snafu::Report::from_error(err));
        }

        if app_config.pause {
            Self::wait_for_keypress();
        }
    }

    fn explore(app_config: &RuntimeConfig, mut out: impl Write) -> Result<(), ApplicationError> {
        let Some(root) = app_config.root.as_deref() else {
            info!("No path given, nothing to list");
            return Ok(());
        };
        if !root.is_dir() {
            info!(
                "{} is not a directory, nothing to list",
                root.best_effort_path_display()
            );
            return Ok(());
        }

        TreePrinter::new(&mut out)
            .with_max_depth(app_config.max_depth)
            .print_root(root)
            .context(TreeSnafu)?;

        if app_config.oldest {
            let oldest = OldestFileFinder::with_max_depth(app_config.max_depth).find(root);
            writeln!(out, "{}", OldestFileReport::from(oldest)).context(OutputSnafu)?;
        }

        if app_config.snapshot {
            let store = SnapshotStore::new(&app_config.snapshot_file);
            Self::run_snapshot_cycle(root, &store, &mut out)?;
        }

        out.flush().context(OutputSnafu)
    }

    /// Build, persist, reload and print, in that order regardless of whether
    /// persisting worked.
    fn run_snapshot_cycle(
        root: &Path,
        store: &SnapshotStore,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let snapshot: Snapshot = match Snapshot::build(root) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("{}", snafu::Report::from_error(err));
                return Ok(());
            }
        };

        if let Err(err) = store.persist(&snapshot) {
            error!("Failed to serialize: {}", snafu::Report::from_error(err));
        }

        let loaded: Snapshot = store.load_or_empty();
        if loaded.is_empty() {
            info!("Reloaded snapshot is empty, nothing to print");
        }
        for entry in loaded.iter() {
            writeln!(out, "{entry}").context(OutputSnafu)?;
        }

        Ok(())
    }

    fn wait_for_keypress() {
        debug!("Waiting for a keypress before exiting");
        let _ = io::stdin().read(&mut [0u8; 1]);
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while printing the tree"))]
    TreeError { source: TreePrintError },
    #[snafu(display("Critical failure encountered while writing to the output"))]
    OutputError { source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn explore_to_string(app_config: &RuntimeConfig) -> String {
        let mut out = Vec::new();
        Application::explore(app_config, &mut out).expect("Writing into a Vec cannot fail");
        String::from_utf8(out).expect("Output should be UTF-8")
    }

    /// `<tmp>/D` with `a.txt` (5 bytes) and an empty `sub`.
    fn scenario_dir() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("D");
        fs::create_dir(&root).expect("Failed to create D");
        fs::write(root.join("a.txt"), "hello").expect("Failed to write a.txt");
        fs::create_dir(root.join("sub")).expect("Failed to create sub");
        (temp_dir, root)
    }

    #[test]
    fn no_path_prints_nothing() {
        assert_eq!(explore_to_string(&RuntimeConfig::default()), "");
    }

    #[test]
    fn missing_path_prints_nothing() {
        let app_config = RuntimeConfig {
            root: Some(PathBuf::from("/does/not/exist")),
            oldest: true,
            snapshot: true,
            ..RuntimeConfig::default()
        };

        assert_eq!(explore_to_string(&app_config), "");
    }

    #[test]
    fn prints_the_tree() {
        let (_temp_dir, root) = scenario_dir();
        let app_config = RuntimeConfig {
            root: Some(root),
            ..RuntimeConfig::default()
        };

        assert_eq!(
            explore_to_string(&app_config),
            "D (2) ----\n   a.txt 5 bytes ----\n   sub (0) ----\n"
        );
    }

    #[test]
    fn snapshot_cycle_prints_reloaded_entries() {
        let (temp_dir, root) = scenario_dir();
        let snapshot_file = temp_dir.path().join("data.dat");
        let app_config = RuntimeConfig {
            root: Some(root),
            snapshot: true,
            snapshot_file: snapshot_file.clone(),
            ..RuntimeConfig::default()
        };

        let output = explore_to_string(&app_config);

        assert_eq!(
            output,
            "D (2) ----\n   a.txt 5 bytes ----\n   sub (0) ----\nsub -> 0\na.txt -> 5\n"
        );
        assert!(snapshot_file.is_file());
    }

    #[test]
    fn failed_persist_still_completes() {
        let (temp_dir, root) = scenario_dir();
        let app_config = RuntimeConfig {
            root: Some(root),
            snapshot: true,
            snapshot_file: temp_dir.path().join("missing").join("data.dat"),
            ..RuntimeConfig::default()
        };

        let output = explore_to_string(&app_config);

        assert_eq!(output, "D (2) ----\n   a.txt 5 bytes ----\n   sub (0) ----\n");
    }

    #[test]
    fn oldest_line_follows_the_tree() {
        let (_temp_dir, root) = scenario_dir();
        let app_config = RuntimeConfig {
            root: Some(root),
            oldest: true,
            ..RuntimeConfig::default()
        };

        let output = explore_to_string(&app_config);

        let last_line = output.lines().last().expect("Output should not be empty");
        assert!(last_line.starts_with("The oldest file is here since: "));
        assert!(last_line.ends_with(" UTC"));
    }

    #[test]
    fn oldest_line_for_a_tree_without_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("empty");
        fs::create_dir(&root).expect("Failed to create empty");
        let app_config = RuntimeConfig {
            root: Some(root),
            oldest: true,
            ..RuntimeConfig::default()
        };

        assert_eq!(
            explore_to_string(&app_config),
            "empty (0) ----\nThere are no files here!\n"
        );
    }
}
