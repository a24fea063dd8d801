//! # bookstack
//! - Repository: <https://github.com/bookstack-rs/bookstack>
//! - Documentation: <https://docs.rs/bookstack>
//!
//! An offline content-archive library: open browsable content
//! [`Book`]s, resolve entries by URL, and search across an entire
//! [`Library`].
//!
//! ## Examples
//! Registering books and retrieving content:
//! ```no_run
//! # use bookstack::library::errors::LibraryResult;
//! use bookstack::Library;
//!
//! # fn main() -> LibraryResult<()> {
//! let library = Library::new();
//!
//! // Discover every book below a directory
//! let outcome = library.scan("/books");
//! println!("registered {} books", outcome.added.len());
//!
//! // Resolve a book's landing page
//! let id = library.ids().remove(0);
//! let main_page = library.main_page(&id)?;
//! let content = library.content(&id, &main_page)?;
//!
//! println!("{}: {} bytes", content.media_type(), content.bytes().len());
//! # Ok(())
//! # }
//! ```
//! Searching across every registered book:
//! ```no_run
//! # use bookstack::Library;
//! # let library = Library::new();
//! // Query auto-complete from entry titles
//! for suggestion in library.suggestions("solar") {
//!     println!("{} -> {}", suggestion.title(), suggestion.href());
//! }
//!
//! // Ranked full-text results with snippets
//! for result in library.search("solar eclipse") {
//!     println!("[{}] {} ({})", result.book(), result.href(), result.score());
//! }
//! ```

#[cfg(feature = "async-tokio")]
pub mod asynchronous;
pub mod book;
pub mod library;
pub mod search;
mod util;

pub use self::{
    book::entry::{Content, Entries, Entry, EntryKind},
    book::metadata::{BookId, BookMetadata},
    book::Book,
    library::{Library, ScanOutcome},
    search::{SearchResult, Suggestion},
};

pub mod errors {
    pub use super::book::errors::{
        ArchiveError, BookError, BookResult, FormatError, ManifestError,
    };
    pub use super::library::errors::{LibraryError, LibraryResult};
}
