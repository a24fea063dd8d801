use crate::book::archive::errors::{ArchiveError, ArchiveResult};
use crate::book::archive::Archive;
use crate::util::uri;
use std::io::{self, Read, Seek, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use zip::read::ZipFile;
use zip::ZipArchive as Zip;

/// Zip containers seek per read, so entry access is serialized
/// behind a [`Mutex`].
pub(crate) struct ZipArchive<R>(Mutex<Zip<R>>);

impl<R: Read + Seek> ZipArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    pub(crate) fn new(reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        Zip::new(reader)
            .map(|zip| Self(Mutex::new(zip)))
            .map_err(|error| ArchiveError::UnreadableArchive {
                source: io::Error::from(error),
                path: path.map(Path::to_path_buf),
            })
    }

    fn get_file<'a>(archive: &'a mut Zip<R>, location: &str) -> ArchiveResult<ZipFile<'a, R>> {
        archive
            .by_name(uri::container_key(location))
            .map_err(|error| ArchiveError::InvalidEntry {
                source: io::Error::from(error),
                entry: location.to_owned(),
            })
    }

    fn acquire_lock(&self) -> ArchiveResult<MutexGuard<'_, Zip<R>>> {
        self.0.lock().map_err(|_| ArchiveError::UnreadableArchive {
            source: io::Error::other("Poisoned ZipArchive"),
            path: None,
        })
    }
}

impl<R: Read + Seek + Send + 'static> Archive for ZipArchive<R> {
    fn copy_entry(&self, location: &str, writer: &mut dyn Write) -> ArchiveResult<u64> {
        let mut lock = self.acquire_lock()?;
        let mut zip_file = Self::get_file(&mut lock, location)?;

        io::copy(&mut zip_file, writer).map_err(|error| ArchiveError::CannotRead {
            source: error,
            entry: location.to_owned(),
        })
    }
}
