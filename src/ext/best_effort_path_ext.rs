use std::path::{Path, PathBuf};

/// Renders a path for log and error messages, preferring the canonical form
/// and falling back to an absolute one when the path does not exist.
pub fn best_effort_path_display(path: &Path) -> String {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Name of the entry as shown in listings: the last path component, or the
/// path itself when it has none (`.`, `/`, `..`).
pub fn entry_display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
    fn entry_display_name(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }

    fn entry_display_name(&self) -> String {
        entry_display_name(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }

    fn entry_display_name(&self) -> String {
        entry_display_name(self)
    }
}
