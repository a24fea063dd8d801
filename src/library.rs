//! The [`Library`] facade: book registry, content dispatch, and
//! cross-book search aggregation.
//!
//! # Overview
//! A [`Library`] owns every open [`Book`] and routes each public
//! operation to the right one. It is a plain owned object rather than
//! process-wide state; hosts that want a single shared instance wrap
//! it in an [`Arc`] themselves, which keeps libraries injectable in
//! tests and teardown explicit ([`Library::remove_all`] or drop).
//!
//! # Concurrency
//! The registry sits behind an [`RwLock`]: every read path takes a
//! shared lock, while [`add`](Library::add)/[`remove`](Library::remove)
//! and friends take an exclusive one. Lookups clone an [`Arc`] handle
//! out of the map and release the lock before touching the container,
//! so long reads and abandoned enumerations never stall registration.

pub mod errors;

use crate::book::entry::Content;
use crate::book::errors::BookResult;
use crate::book::metadata::BookId;
use crate::book::Book;
use crate::library::errors::{LibraryError, LibraryResult};
use crate::search::{self, SearchIndex, SearchResult, Suggestion};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Conventional filename extension of zipped book containers,
/// recognized by [`Library::scan`].
pub const BOOK_EXTENSION: &str = "book";

type Shelf = BTreeMap<BookId, Arc<ShelfBook>>;

/// A registered book plus its (possibly unavailable) search index.
struct ShelfBook {
    book: Book,
    index: Option<SearchIndex>,
}

/// The coordinating facade over a collection of open [`Book`]s.
///
/// Books register under their stable [`BookId`]; identifiers are
/// unique across the registry for its whole lifetime. All collection
/// views ([`ids`](Self::ids), cross-book search merges) order by
/// identifier, so results are reproducible regardless of
/// registration order.
///
/// # Examples
/// ```no_run
/// # use bookstack::library::errors::LibraryResult;
/// # use bookstack::Library;
/// # fn main() -> LibraryResult<()> {
/// let library = Library::new();
/// let id = library.add("/books/wiki.book")?;
///
/// let main_page = library.main_page(&id)?;
/// let content = library.content(&id, &main_page)?;
/// println!("{}", content.media_type());
///
/// for result in library.search("solar eclipse") {
///     println!("{}: {:?}", result.href(), result.snippet());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Library {
    shelf: RwLock<Shelf>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the book at `path` and registers it.
    ///
    /// The search index is built eagerly, outside the registry lock;
    /// if indexing fails the book still registers and remains fully
    /// readable, with the failure logged and full-text search
    /// degraded (see
    /// [`IndexUnavailable`](LibraryError::IndexUnavailable)).
    ///
    /// # Errors
    /// - [`LibraryError::Book`]: The path is unreadable, not a valid
    ///   container, or its manifest is malformed.
    /// - [`LibraryError::DuplicateBook`]: A book with the same
    ///   identifier is already registered.
    pub fn add(&self, path: impl AsRef<Path>) -> LibraryResult<BookId> {
        self.add_book(Book::open(path)?)
    }

    /// Registers an already open [`Book`].
    ///
    /// # Errors
    /// [`LibraryError::DuplicateBook`]: A book with the same
    /// identifier is already registered.
    pub fn add_book(&self, book: Book) -> LibraryResult<BookId> {
        let id = book.id().clone();

        // Cheap rejection before the index is built.
        if self.read_shelf().contains_key(&id) {
            return Err(LibraryError::DuplicateBook { id });
        }

        let index = match SearchIndex::build(&book) {
            Ok(index) => Some(index),
            Err(error) => {
                tracing::warn!(book = %id, %error, "search index unavailable");
                None
            }
        };

        let mut shelf = self.write_shelf();
        // A racing add may have registered the same book meanwhile.
        if shelf.contains_key(&id) {
            return Err(LibraryError::DuplicateBook { id });
        }
        shelf.insert(id.clone(), Arc::new(ShelfBook { book, index }));
        tracing::info!(book = %id, "book registered");
        Ok(id)
    }

    /// Discovers and registers every book under `dir`.
    ///
    /// A book is a file with the [`BOOK_EXTENSION`] or any directory
    /// (unzipped container). Paths visit in sorted order so repeated
    /// scans are reproducible. Books already registered are skipped;
    /// paths that fail to open are reported in the outcome without
    /// aborting the sweep.
    pub fn scan(&self, dir: impl AsRef<Path>) -> ScanOutcome {
        let dir = dir.as_ref();
        let mut outcome = ScanOutcome::default();

        let mut paths = match candidate_paths(dir) {
            Ok(paths) => paths,
            Err(error) => {
                tracing::warn!(path = %dir.display(), %error, "scan failed to read directory");
                outcome.failures.push((dir.to_path_buf(), error.into()));
                return outcome;
            }
        };
        paths.sort();

        for path in paths {
            match self.add(&path) {
                Ok(id) => outcome.added.push(id),
                Err(LibraryError::DuplicateBook { id }) => {
                    tracing::debug!(book = %id, path = %path.display(), "already registered");
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "failed to register book");
                    outcome.failures.push((path, error));
                }
            }
        }
        tracing::info!(
            path = %dir.display(),
            added = outcome.added.len(),
            failed = outcome.failures.len(),
            "scan complete",
        );
        outcome
    }

    /// Unregisters the book with the given identifier,
    /// releasing its container handle once no reads reference it.
    ///
    /// # Errors
    /// [`LibraryError::BookNotFound`]: No book with this identifier
    /// is registered.
    pub fn remove(&self, id: &BookId) -> LibraryResult<()> {
        self.write_shelf()
            .remove(id)
            .map(|_| tracing::info!(book = %id, "book unregistered"))
            .ok_or_else(|| LibraryError::BookNotFound { id: id.clone() })
    }

    /// Unregisters every book, releasing all container handles once
    /// in-flight reads complete.
    pub fn remove_all(&self) {
        let mut shelf = self.write_shelf();
        let count = shelf.len();
        shelf.clear();
        tracing::info!(count, "all books unregistered");
    }

    /// The identifiers of every registered book, in ascending order.
    pub fn ids(&self) -> Vec<BookId> {
        self.read_shelf().keys().cloned().collect()
    }

    /// The number of registered books.
    pub fn len(&self) -> usize {
        self.read_shelf().len()
    }

    /// Returns `true` if no book is registered.
    pub fn is_empty(&self) -> bool {
        self.read_shelf().is_empty()
    }

    /// Resolves an entry of the identified book to its final content,
    /// following redirects.
    ///
    /// # Errors
    /// - [`LibraryError::BookNotFound`]: Unknown identifier.
    /// - [`LibraryError::Book`]: Unknown URL, redirect loop, or
    ///   container I/O failure (see [`Book::content`]).
    pub fn content(&self, id: &BookId, href: &str) -> LibraryResult<Content> {
        Ok(self.shelf_book(id)?.book.content(href)?)
    }

    /// The canonical URL of the identified book's landing entry.
    ///
    /// # Errors
    /// [`LibraryError::BookNotFound`]: Unknown identifier.
    pub fn main_page(&self, id: &BookId) -> LibraryResult<String> {
        Ok(self.shelf_book(id)?.book.main_page().to_owned())
    }

    /// Returns a lazy iterator over every entry URL of the identified
    /// book, in manifest order.
    ///
    /// The iterator holds its own handle to the book: it stays valid
    /// if the book is concurrently removed, supports early
    /// termination, and releases the handle when dropped.
    ///
    /// # Errors
    /// [`LibraryError::BookNotFound`]: Unknown identifier.
    pub fn entry_urls(&self, id: &BookId) -> LibraryResult<EntryUrls> {
        Ok(EntryUrls {
            shelf_book: self.shelf_book(id)?,
            index: 0,
        })
    }

    /// Title suggestions for `term` across every registered book,
    /// merged by relevance then title, bounded by
    /// [`MAX_SUGGESTIONS`](crate::search::MAX_SUGGESTIONS).
    ///
    /// An empty or whitespace term yields an empty sequence.
    pub fn suggestions(&self, term: &str) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        for shelf_book in self.snapshot() {
            suggestions.extend(search::suggest(&shelf_book.book, term));
        }

        search::sort_suggestions(&mut suggestions);
        suggestions.truncate(search::MAX_SUGGESTIONS);
        suggestions
    }

    /// Ranked full-text results for `term` across every registered
    /// book, merged by score descending with `(book, href)` ascending
    /// tie-breaks.
    ///
    /// Books whose index is unavailable are skipped (degraded, not an
    /// error). An empty term yields an empty sequence.
    pub fn search(&self, term: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for shelf_book in self.snapshot() {
            let id = shelf_book.book.id();
            let Some(index) = &shelf_book.index else {
                tracing::debug!(book = %id, "skipping search; index unavailable");
                continue;
            };
            results.extend(index.search(term).into_iter().map(|hit| SearchResult {
                book: id.clone(),
                href: hit.href,
                title: hit.title,
                score: hit.score,
                snippet: hit.snippet,
            }));
        }

        search::sort_results(&mut results);
        results
    }

    /// Ranked full-text results for `term` within one book.
    ///
    /// # Errors
    /// - [`LibraryError::BookNotFound`]: Unknown identifier.
    /// - [`LibraryError::IndexUnavailable`]: The book's index failed
    ///   to build.
    pub fn search_book(&self, id: &BookId, term: &str) -> LibraryResult<Vec<SearchResult>> {
        let shelf_book = self.shelf_book(id)?;
        let index = shelf_book
            .index
            .as_ref()
            .ok_or_else(|| LibraryError::IndexUnavailable { id: id.clone() })?;

        Ok(index
            .search(term)
            .into_iter()
            .map(|hit| SearchResult {
                book: id.clone(),
                href: hit.href,
                title: hit.title,
                score: hit.score,
                snippet: hit.snippet,
            })
            .collect())
    }

    fn shelf_book(&self, id: &BookId) -> LibraryResult<Arc<ShelfBook>> {
        self.read_shelf()
            .get(id)
            .cloned()
            .ok_or_else(|| LibraryError::BookNotFound { id: id.clone() })
    }

    /// Registered books in identifier order, detached from the lock.
    fn snapshot(&self) -> Vec<Arc<ShelfBook>> {
        self.read_shelf().values().cloned().collect()
    }

    // Registered books are immutable and map mutations are atomic,
    // so a poisoned lock still guards a coherent shelf.
    fn read_shelf(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_shelf(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("ids", &self.ids())
            .finish_non_exhaustive()
    }
}

/// The result of one [`Library::scan`] sweep.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Identifiers of newly registered books, in path order.
    pub added: Vec<BookId>,
    /// Paths that looked like books but failed to register.
    pub failures: Vec<(PathBuf, LibraryError)>,
}

/// Lazy iterator over the entry URLs of one registered book.
///
/// Returned by [`Library::entry_urls`]. Holds an internal handle to
/// the book, released on drop.
pub struct EntryUrls {
    shelf_book: Arc<ShelfBook>,
    index: usize,
}

impl Iterator for EntryUrls {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.shelf_book.book.entries().nth(self.index)?;
        self.index += 1;
        Some(entry.href().to_owned())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shelf_book.book.entry_count() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EntryUrls {}

/// Paths under `dir` that plausibly hold a book: `.book` files and
/// directories.
fn candidate_paths(dir: &Path) -> BookResult<Vec<PathBuf>> {
    use crate::book::errors::ArchiveError;

    let unreadable = |source: std::io::Error| ArchiveError::UnreadableArchive {
        source,
        path: Some(dir.to_path_buf()),
    };

    let mut paths = Vec::new();
    for result in dir.read_dir().map_err(unreadable)? {
        let entry = result.map_err(unreadable)?;
        let path = entry.path();

        let is_book_file = path.is_file()
            && path
                .extension()
                .is_some_and(|extension| extension == BOOK_EXTENSION);

        if is_book_file || path.is_dir() {
            paths.push(path);
        }
    }
    Ok(paths)
}
