use crate::book::archive::errors::{ArchiveError, ArchiveResult};
use crate::book::archive::Archive;
use crate::util::uri;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// An unzipped book: a directory laid out identically to the
/// zip container.
///
/// Entries resolve strictly below the canonicalized root; symlinked
/// entries are rejected, so a crafted manifest cannot address files
/// outside the container.
#[derive(Debug)]
pub(crate) struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    pub(crate) fn new(path: &Path) -> ArchiveResult<Self> {
        let unreadable = |source: io::Error| ArchiveError::UnreadableArchive {
            source,
            path: Some(path.to_path_buf()),
        };

        let root = path.canonicalize().map_err(unreadable)?;
        if !root.is_dir() {
            return Err(unreadable(io::Error::from(io::ErrorKind::NotADirectory)));
        }
        Ok(Self { root })
    }

    /// Maps a canonical entry URL onto a regular file below the root.
    fn entry_path(&self, location: &str) -> ArchiveResult<PathBuf> {
        let invalid = |source: io::Error| ArchiveError::InvalidEntry {
            source,
            entry: location.to_owned(),
        };

        let stored = self.root.join(uri::as_relative_path(location));
        let metadata = stored.symlink_metadata().map_err(invalid)?;
        if metadata.is_symlink() {
            return Err(invalid(io::Error::other("entry is a symbolic link")));
        }
        if !metadata.is_file() {
            return Err(invalid(io::Error::from(io::ErrorKind::NotFound)));
        }

        let resolved = stored.canonicalize().map_err(invalid)?;
        if !resolved.starts_with(&self.root) {
            return Err(invalid(io::Error::from(io::ErrorKind::NotFound)));
        }
        Ok(resolved)
    }
}

impl Archive for DirectoryArchive {
    fn copy_entry(&self, location: &str, writer: &mut dyn Write) -> ArchiveResult<u64> {
        let cannot_read = |source: io::Error| ArchiveError::CannotRead {
            source,
            entry: location.to_owned(),
        };

        let mut file = File::open(self.entry_path(location)?).map_err(cannot_read)?;
        io::copy(&mut file, writer).map_err(cannot_read)
    }
}
