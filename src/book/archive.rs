pub(super) mod directory;
pub(crate) mod errors;
pub(super) mod zip;

use crate::book::archive::directory::DirectoryArchive;
use crate::book::archive::errors::{ArchiveError, ArchiveResult};
use crate::book::archive::zip::ZipArchive;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read access to the container backing a [`Book`](crate::Book).
///
/// Locations are canonical entry URLs: percent-decoded,
/// normalized, and absolute against the container root.
pub(crate) trait Archive: Send + Sync {
    fn copy_entry(&self, location: &str, writer: &mut dyn Write) -> ArchiveResult<u64>;

    fn read_entry_bytes(&self, location: &str) -> ArchiveResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.copy_entry(location, &mut buf)?;
        Ok(buf)
    }
}

/// Open the zip container if the path is a file.
///
/// If it is a directory, the contents can be accessed directly,
/// which makes a zip container unnecessary.
pub(super) fn get_archive(path: &Path) -> ArchiveResult<Box<dyn Archive>> {
    Ok(if path.is_file() {
        let file = File::open(path).map_err(|error| ArchiveError::UnreadableArchive {
            source: error,
            path: Some(path.to_path_buf()),
        })?;
        Box::new(ZipArchive::new(BufReader::new(file), Some(path))?)
    } else {
        Box::new(DirectoryArchive::new(path)?)
    })
}
