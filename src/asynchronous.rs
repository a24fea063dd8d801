//! Asynchronous facade operations, available with the `async-tokio`
//! feature.
//!
//! Long operations (scanning a directory, opening a container,
//! querying every index) are blocking by nature; [`AsyncLibrary`]
//! moves them onto the tokio blocking pool so the calling task is
//! never stalled, delivering results through futures instead of
//! synchronous returns.

use crate::book::entry::Content;
use crate::book::metadata::BookId;
use crate::library::errors::LibraryResult;
use crate::library::ScanOutcome;
use crate::search::{SearchResult, Suggestion};
use crate::Library;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// An object-safe asynchronous content source, for hosts that
/// abstract over where book content comes from.
#[async_trait]
pub trait AsyncContentSource: Send + Sync {
    /// Asynchronous [`Library::content`].
    async fn content(&self, id: &BookId, href: &str) -> LibraryResult<Content>;

    /// Asynchronous [`Library::main_page`].
    async fn main_page(&self, id: &BookId) -> LibraryResult<String>;
}

/// A cloneable asynchronous handle over a shared [`Library`].
///
/// # Examples
/// ```no_run
/// # use bookstack::asynchronous::AsyncLibrary;
/// # use bookstack::Library;
/// # use std::sync::Arc;
/// # async fn example() {
/// let library = AsyncLibrary::new(Arc::new(Library::new()));
///
/// let outcome = library.scan("/books".into()).await;
/// println!("registered {} books", outcome.added.len());
///
/// for result in library.search("solar eclipse".into()).await {
///     println!("{}", result.href());
/// }
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AsyncLibrary {
    inner: Arc<Library>,
}

impl AsyncLibrary {
    /// Wraps a shared [`Library`].
    pub fn new(library: Arc<Library>) -> Self {
        Self { inner: library }
    }

    /// The underlying synchronous [`Library`].
    pub fn library(&self) -> &Arc<Library> {
        &self.inner
    }

    /// [`Library::scan`] on the blocking pool.
    pub async fn scan(&self, dir: PathBuf) -> ScanOutcome {
        let library = Arc::clone(&self.inner);
        run_blocking(move || library.scan(dir)).await
    }

    /// [`Library::add`] on the blocking pool.
    pub async fn add(&self, path: PathBuf) -> LibraryResult<BookId> {
        let library = Arc::clone(&self.inner);
        run_blocking(move || library.add(path)).await
    }

    /// [`Library::search`] on the blocking pool.
    pub async fn search(&self, term: String) -> Vec<SearchResult> {
        let library = Arc::clone(&self.inner);
        run_blocking(move || library.search(&term)).await
    }

    /// [`Library::suggestions`] on the blocking pool.
    pub async fn suggestions(&self, term: String) -> Vec<Suggestion> {
        let library = Arc::clone(&self.inner);
        run_blocking(move || library.suggestions(&term)).await
    }
}

#[async_trait]
impl AsyncContentSource for AsyncLibrary {
    async fn content(&self, id: &BookId, href: &str) -> LibraryResult<Content> {
        let library = Arc::clone(&self.inner);
        let id = id.clone();
        let href = href.to_owned();
        run_blocking(move || library.content(&id, &href)).await
    }

    async fn main_page(&self, id: &BookId) -> LibraryResult<String> {
        let library = Arc::clone(&self.inner);
        let id = id.clone();
        run_blocking(move || library.main_page(&id)).await
    }
}

async fn run_blocking<T: Send + 'static>(task: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(task)
        .await
        .expect("blocking library task panicked")
}
