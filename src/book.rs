//! Core [`Book`] module: opening a content archive and resolving
//! its entries.
//!
//! # Overview
//! A book is an OCF-style container, either a zip file (conventional
//! extension `.book`) or a directory with identical layout, holding:
//! - `META-INF/book.xml`: the manifest declaring metadata, the main
//!   page, and every addressable [`Entry`].
//! - Content entries stored at their URL paths, where a leading `/`
//!   denotes the container root.
//!
//! ## Core Components
//! - [`errors`]: Book-related error types.
//! - [`entry`]: URL-addressable units (content, redirects) and
//!   resolved [`Content`].
//! - [`metadata`]: Identity details (identifier, title, language).

pub(crate) mod archive;
pub(crate) mod consts;
pub mod entry;
pub mod errors;
pub mod metadata;
mod parser;

use crate::book::archive::Archive;
use crate::book::consts::manifest;
use crate::book::entry::{Content, Entries, Entry, EntryData, EntryKindData};
use crate::book::errors::{BookError, BookResult};
use crate::book::metadata::BookMetadata;
use crate::util::uri;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};
use std::path::Path;

/// The maximum number of redirect hops [`Book::content`] follows
/// before failing with [`BookError::RedirectLoop`].
pub const MAX_REDIRECT_HOPS: usize = 8;

/// An open content archive.
///
/// Provides access to the following contents:
/// - [`BookMetadata`]: Identity details (identifier, title, language)
/// - [`Entry`]: URL-addressable content and redirect aliases
/// - [`Content`]: Resolved media type and bytes pairs
///
/// A book is immutable once opened; concurrent reads from multiple
/// threads are safe, with zip-backed books serializing entry access
/// internally.
///
/// # Examples
/// - Reading the main page of a book:
/// ```no_run
/// # use bookstack::book::errors::BookResult;
/// # fn main() -> BookResult<()> {
/// let book = bookstack::Book::open("/books/wiki.book")?;
/// let content = book.content(book.main_page())?;
///
/// println!("{}: {} bytes", content.media_type(), content.bytes().len());
/// # Ok(())
/// # }
/// ```
pub struct Book {
    archive: Box<dyn Archive>,
    metadata: BookMetadata,
    main_page: String,
    table: EntryTable,
}

pub(crate) struct EntryTable {
    /// Manifest order.
    pub(crate) entries: Vec<EntryData>,
    /// Canonical URL -> index into `entries`.
    by_href: HashMap<String, usize>,
}

impl Book {
    /// Opens a [`Book`] from the given [`Path`].
    ///
    /// The provided path may be a zipped book **file** or a
    /// **directory** containing the contents of an unzipped book.
    ///
    /// # Errors
    /// - [`ArchiveError`](errors::ArchiveError): Missing or invalid container.
    /// - [`FormatError`](errors::FormatError): Missing or malformed manifest.
    ///
    /// # See Also
    /// - [`Self::read`] to open from a byte source.
    pub fn open(path: impl AsRef<Path>) -> BookResult<Self> {
        Self::new(archive::get_archive(path.as_ref())?)
    }

    /// Opens a [`Book`] from any implementation of
    /// [`Read`] + [`Seek`] + [`Send`], such as a
    /// [`Cursor`](std::io::Cursor) over bytes.
    ///
    /// # Errors
    /// - [`ArchiveError`](errors::ArchiveError): The byte source is not
    ///   a valid zip container.
    /// - [`FormatError`](errors::FormatError): Missing or malformed manifest.
    pub fn read<R: Read + Seek + Send + 'static>(reader: R) -> BookResult<Self> {
        Self::new(Box::new(archive::zip::ZipArchive::new(reader, None)?))
    }

    fn new(archive: Box<dyn Archive>) -> BookResult<Self> {
        let manifest_bytes = archive.read_entry_bytes(manifest::LOCATION)?;
        let data = parser::parse_manifest(&manifest_bytes)?;

        let by_href = data
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.href.clone(), index))
            .collect();

        Ok(Self {
            archive,
            metadata: data.metadata,
            main_page: data.main_page,
            table: EntryTable {
                entries: data.entries,
                by_href,
            },
        })
    }

    /// The stable identifier of this book.
    pub fn id(&self) -> &metadata::BookId {
        self.metadata.identifier()
    }

    /// Metadata details of this book.
    pub fn metadata(&self) -> &BookMetadata {
        &self.metadata
    }

    /// The canonical URL of the designated landing entry.
    ///
    /// The reference is validated at open: on any successfully opened
    /// book, resolving the main page through [`Self::content`] never
    /// yields [`BookError::EntryNotFound`].
    pub fn main_page(&self) -> &str {
        &self.main_page
    }

    /// Looks up the [`Entry`] at the given URL without following
    /// redirects.
    ///
    /// The URL may be percent-encoded or decoded, relative or
    /// absolute; it is canonicalized before lookup.
    pub fn entry(&self, href: &str) -> Option<Entry<'_>> {
        let location = uri::canonicalize(href);
        self.table.by_href.get(&location).map(|&index| Entry {
            book: self,
            data: &self.table.entries[index],
        })
    }

    /// Resolves the entry at the given URL to its final content,
    /// following up to [`MAX_REDIRECT_HOPS`] redirect aliases.
    ///
    /// # Errors
    /// - [`BookError::EntryNotFound`]: No entry is addressable at the
    ///   URL, or a redirect points at a missing entry.
    /// - [`BookError::RedirectLoop`]: The redirect chain exceeded
    ///   [`MAX_REDIRECT_HOPS`].
    /// - [`ArchiveError`](errors::ArchiveError): Reading the stored
    ///   bytes failed.
    pub fn content(&self, href: &str) -> BookResult<Content> {
        let origin = uri::canonicalize(href);
        let mut location = &origin;

        // `<=` so a chain of exactly MAX_REDIRECT_HOPS still resolves.
        for _ in 0..=MAX_REDIRECT_HOPS {
            let data = self.resolve(location)?;

            match &data.kind {
                EntryKindData::Content { media_type } => {
                    return Ok(Content {
                        media_type: media_type.clone(),
                        bytes: self.archive.read_entry_bytes(&data.href)?,
                    });
                }
                EntryKindData::Redirect { target } => location = target,
            }
        }
        Err(BookError::RedirectLoop {
            href: origin,
            hops: MAX_REDIRECT_HOPS,
        })
    }

    /// Returns a lazy, restartable iterator over all entries,
    /// in manifest order.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            book: self,
            index: 0,
        }
    }

    /// The number of addressable entries.
    pub fn entry_count(&self) -> usize {
        self.table.entries.len()
    }

    /// Raw stored bytes of the entry at the given *canonical* URL,
    /// without redirect handling.
    pub(crate) fn entry_bytes(&self, location: &str) -> BookResult<Vec<u8>> {
        Ok(self.archive.read_entry_bytes(location)?)
    }

    /// `location` must already be canonical.
    fn resolve(&self, location: &str) -> BookResult<&EntryData> {
        self.table
            .by_href
            .get(location)
            .map(|&index| &self.table.entries[index])
            .ok_or_else(|| BookError::EntryNotFound {
                href: location.to_owned(),
            })
    }
}

impl Debug for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Book")
            .field("metadata", &self.metadata)
            .field("main_page", &self.main_page)
            .field("entry_count", &self.table.entries.len())
            .finish_non_exhaustive()
    }
}
