//! Error-related types for a [`Library`](crate::Library).

use crate::book::errors::{ArchiveError, BookError, FormatError};
use crate::book::metadata::BookId;

/// Alias for `Result<T, LibraryError>`.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Possible errors for a [`Library`](crate::Library).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// An operation on a registered book failed, including opening
    /// a book during [`add`](crate::Library::add).
    #[error(transparent)]
    Book(#[from] BookError),

    /// No book with the given identifier is registered.
    #[error("[BookNotFound - `{id}`]: No book with this identifier is registered")]
    BookNotFound {
        /// The identifier that failed to resolve.
        id: BookId,
    },

    /// A book with the same identifier is already registered.
    #[error("[DuplicateBook - `{id}`]: A book with this identifier is already registered")]
    DuplicateBook {
        /// The identifier already present in the registry.
        id: BookId,
    },

    /// Full-text search was requested for a book whose index
    /// failed to build.
    ///
    /// Content retrieval and suggestions remain available for
    /// such books.
    #[error("[IndexUnavailable - `{id}`]: The search index for this book failed to build")]
    IndexUnavailable {
        /// The book lacking an index.
        id: BookId,
    },
}

impl From<ArchiveError> for LibraryError {
    fn from(error: ArchiveError) -> Self {
        Self::Book(error.into())
    }
}

impl From<FormatError> for LibraryError {
    fn from(error: FormatError) -> Self {
        Self::Book(error.into())
    }
}
