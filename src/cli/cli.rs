use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::filesystem::DEFAULT_MAX_DEPTH;
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;

/// Recursively lists a directory with file sizes and attribute flags.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory to list
    #[clap(allow_hyphen_values = true)]
    pub path: Option<PathBuf>,
    /// Anything after the directory is accepted and ignored
    #[clap(hide = true, allow_hyphen_values = true)]
    pub ignored: Vec<OsString>,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Save a snapshot of the directory's top level, reload it and print it
    #[clap(long, short)]
    pub snapshot: bool,

    /// Where the snapshot is saved
    #[clap(long, short = 'f', default_value = DEFAULT_SNAPSHOT_FILE)]
    pub snapshot_file: PathBuf,

    /// Report when the oldest file in the tree was created
    #[clap(long, short)]
    pub oldest: bool,

    /// Deepest level to descend to; symlink cycles stop here
    #[clap(long, short = 'd', default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Exit right away instead of waiting for a keypress
    #[clap(long)]
    pub no_pause: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn path_is_optional() {
        let cli = Cli::try_parse_from(["dirsnap"]).expect("Failed to parse arguments");

        assert_eq!(cli.path, None);
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.snapshot_file, PathBuf::from("data.dat"));
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["dirsnap", "-s", "-o", "-d", "5", "-l", "silent", "dir"])
            .expect("Failed to parse arguments");

        assert_eq!(cli.path, Some(PathBuf::from("dir")));
        assert!(cli.snapshot);
        assert!(cli.oldest);
        assert_eq!(cli.max_depth, 5);
        assert_eq!(cli.log_level, LogLevel::Silent);
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let cli = Cli::try_parse_from(["dirsnap", "some/dir", "extra", "-x"])
            .expect("Failed to parse arguments");

        assert_eq!(cli.path, Some(PathBuf::from("some/dir")));
        assert_eq!(cli.ignored, [OsString::from("extra"), OsString::from("-x")]);
    }

    #[test]
    fn flags_after_the_path_still_apply() {
        let cli = Cli::try_parse_from(["dirsnap", "some/dir", "--no-pause", "-s"])
            .expect("Failed to parse arguments");

        assert_eq!(cli.path, Some(PathBuf::from("some/dir")));
        assert!(cli.no_pause);
        assert!(cli.snapshot);
        assert!(cli.ignored.is_empty());
    }

    #[test]
    fn path_may_start_with_a_hyphen() {
        let cli = Cli::try_parse_from(["dirsnap", "-weird-dir"]).expect("Failed to parse arguments");

        assert_eq!(cli.path, Some(PathBuf::from("-weird-dir")));
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["dirsnap", "--log-level", "loud"]).is_err());
    }
}
