use std::fmt::{self, Write as _};
use std::fs::Metadata;
use std::path::Path;

use bitflags::bitflags;
use tracing::debug;

use crate::ext::BestEffortPathExt;

bitflags! {
    /// Raw DOS-style attribute bits of a filesystem entry.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct DosAttributes: u32 {
        const READ_ONLY = 0x01;
        const HIDDEN    = 0x02;
        const SYSTEM    = 0x04;
        const DIRECTORY = 0x10;
        const ARCHIVE   = 0x20;
    }
}

impl DosAttributes {
    /// Reads the attribute bits of `path`, following symlinks when the target
    /// exists. Unreadable entries have no bits set.
    pub fn read(path: &Path) -> Self {
        match path.metadata().or_else(|_| path.symlink_metadata()) {
            Ok(metadata) => Self::from_metadata(path, &metadata),
            Err(err) => {
                debug!(
                    "Cannot read attributes of {}: {err}",
                    path.best_effort_path_display()
                );
                Self::empty()
            }
        }
    }

    #[cfg(windows)]
    fn from_metadata(_path: &Path, metadata: &Metadata) -> Self {
        use std::os::windows::fs::MetadataExt;

        Self::from_bits_truncate(metadata.file_attributes())
    }

    #[cfg(not(windows))]
    fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let mut attributes = Self::empty();
        attributes.set(Self::READ_ONLY, metadata.permissions().readonly());
        attributes.set(Self::HIDDEN, is_dot_file(path));
        attributes.set(Self::DIRECTORY, metadata.is_dir());
        attributes
    }
}

#[cfg(not(windows))]
fn is_dot_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// The four-character `rhas` flag string printed next to every entry.
///
/// The archive position mirrors the read-only bit, not the archive bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeFlags {
    pub read_only: bool,
    pub hidden: bool,
    pub archive: bool,
    pub system: bool,
}

impl From<DosAttributes> for AttributeFlags {
    fn from(attributes: DosAttributes) -> Self {
        Self {
            read_only: attributes.contains(DosAttributes::READ_ONLY),
            hidden: attributes.contains(DosAttributes::HIDDEN),
            archive: attributes.contains(DosAttributes::READ_ONLY),
            system: attributes.contains(DosAttributes::SYSTEM),
        }
    }
}

impl fmt::Display for AttributeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions = [
            (self.read_only, 'r'),
            (self.hidden, 'h'),
            (self.archive, 'a'),
            (self.system, 's'),
        ];
        for (set, flag) in positions {
            f.write_char(if set { flag } else { '-' })?;
        }
        Ok(())
    }
}

pub fn attributes(path: &Path) -> AttributeFlags {
    DosAttributes::read(path).into()
}

/// Byte length of a file. Broken symlinks report the length of the link
/// itself, anything else unreadable reports zero.
pub fn file_size(path: &Path) -> u64 {
    match path.metadata().or_else(|_| path.symlink_metadata()) {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            debug!(
                "Cannot read size of {}: {err}",
                path.best_effort_path_display()
            );
            0
        }
    }
}
