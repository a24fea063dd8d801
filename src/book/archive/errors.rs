use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the archive backing a [`Book`](crate::Book).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// A given location does not point to an entry within the container.
    #[error("[InvalidEntry - `{entry}`]: {source}")]
    InvalidEntry {
        /// The root cause of the error.
        source: io::Error,
        /// The container location responsible for triggering the error.
        entry: String,
    },

    /// The entry exists although is unable to be read, typically I/O.
    #[error("[CannotRead - `{entry}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The container location responsible for triggering the error.
        entry: String,
    },

    /// The archive itself is unreadable due to not existing,
    /// unsupported format, or malformed state.
    ///
    /// This error is *generally* thrown **before** a book is instantiated.
    ///
    /// Path *is* [`None`] when a book is opened from a raw reader
    /// (`R: Read + Seek`) rather than a filesystem path, such as through
    /// [`Book::read`](crate::Book::read).
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },
}
