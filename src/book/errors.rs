//! Error-related types for a [`Book`](super::Book).

pub use crate::book::archive::errors::ArchiveError;
pub use crate::book::archive::errors::ArchiveResult;
use std::error::Error;

/// Alias for `Result<T, BookError>`.
pub type BookResult<T> = Result<T, BookError>;

/// Possible errors for a [`Book`](crate::Book).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum BookError {
    /// Entry access within the book container has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The book manifest is missing or malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// No entry, content or redirect, is addressable at the given URL.
    #[error("[EntryNotFound - `{href}`]: No entry is addressable at this URL")]
    EntryNotFound {
        /// The canonical URL that failed to resolve.
        href: String,
    },

    /// A redirect chain exceeded the hop bound without reaching
    /// a content entry.
    ///
    /// Malformed books may contain redirect cycles; resolution gives up
    /// after [`MAX_REDIRECT_HOPS`](crate::book::MAX_REDIRECT_HOPS) hops.
    #[error("[RedirectLoop - `{href}`]: Redirect chain exceeded {hops} hops")]
    RedirectLoop {
        /// The canonical URL resolution started from.
        href: String,
        /// The number of hops followed before giving up.
        hops: usize,
    },
}

/// Possible format errors for a [`Book`](crate::Book).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// Book manifest content unexpectedly causes an internal parser error.
    ///
    /// This may originate from malformed content within
    /// `META-INF/book.xml`, such as improper XML.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// Structural errors within a well-formed `META-INF/book.xml`.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Structural errors within the book manifest, `META-INF/book.xml`.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// The root `book` element is not found.
    #[error("Missing `book` root element")]
    NoBookElement,

    /// The `identifier` metadata entry is missing or empty.
    ///
    /// The identifier is the stable book ID; a book cannot be
    /// registered without one.
    #[error("Missing or empty `identifier` metadata entry")]
    MissingIdentifier,

    /// The `title` metadata entry is missing or empty.
    #[error("Missing or empty `title` metadata entry")]
    MissingTitle,

    /// The `main-page` element is missing.
    ///
    /// Every book must designate a landing entry.
    #[error("Missing `main-page` element")]
    NoMainPage,

    /// The `main-page` reference does not reach a content entry,
    /// either because no entry is listed at its URL or because it
    /// enters an unresolvable redirect chain.
    #[error("Main page `{0}` does not resolve to a content entry")]
    DanglingMainPage(String),

    /// A required attribute is missing from an element.
    #[error("Missing `{attribute}` attribute on `{element}` element")]
    MissingAttribute {
        /// The element lacking the attribute.
        element: &'static str,
        /// The missing attribute.
        attribute: &'static str,
    },

    /// Two entries resolve to the same canonical URL.
    ///
    /// Each addressable URL must map to exactly one entry.
    #[error("Duplicate entry URL found: {0}")]
    DuplicateHref(String),
}
