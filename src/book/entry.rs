//! URL-addressable units within a [`Book`](crate::Book).

use crate::book::Book;

/// Owned entry details held by a [`Book`](crate::Book)'s entry table.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EntryData {
    /// Canonical URL: percent-decoded, normalized, absolute.
    pub(crate) href: String,
    pub(crate) title: Option<String>,
    pub(crate) kind: EntryKindData,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum EntryKindData {
    Content { media_type: String },
    Redirect { target: String },
}

/// A single URL-addressable unit within a [`Book`]:
/// a content entry or a redirect alias to another entry.
///
/// Entries are immutable views tied to the lifetime of their
/// owning [`Book`] instance (`'book`).
#[derive(Clone, Copy, Debug)]
pub struct Entry<'book> {
    pub(crate) book: &'book Book,
    pub(crate) data: &'book EntryData,
}

impl<'book> Entry<'book> {
    /// The canonical URL of this entry.
    ///
    /// Always percent-decoded, normalized, and absolute against the
    /// container root (e.g., `/articles/home page.html`).
    pub fn href(&self) -> &'book str {
        &self.data.href
    }

    /// The display title of this entry, if the manifest declares one.
    pub fn title(&self) -> Option<&'book str> {
        self.data.title.as_deref()
    }

    /// Whether this entry is a content entry or a redirect alias.
    pub fn kind(&self) -> EntryKind<'book> {
        match &self.data.kind {
            EntryKindData::Content { media_type } => EntryKind::Content { media_type },
            EntryKindData::Redirect { target } => EntryKind::Redirect { target },
        }
    }

    /// Returns `true` if this entry is a redirect alias.
    pub fn is_redirect(&self) -> bool {
        matches!(self.data.kind, EntryKindData::Redirect { .. })
    }

    /// Resolves this entry to its final content, following redirect
    /// aliases.
    ///
    /// # Errors
    /// See [`Book::content`] for possible errors.
    pub fn content(&self) -> crate::book::errors::BookResult<Content> {
        self.book.content(&self.data.href)
    }
}

/// The kind of an [`Entry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntryKind<'book> {
    /// An entry with stored content of the given media type.
    Content {
        /// The declared media type (e.g., `text/html`).
        media_type: &'book str,
    },
    /// An alias pointing at another entry.
    Redirect {
        /// The canonical URL the alias points at.
        target: &'book str,
    },
}

/// Resolved entry content: a tagged media type and bytes pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Content {
    pub(crate) media_type: String,
    pub(crate) bytes: Vec<u8>,
}

impl Content {
    /// The declared media type of the resolved entry.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The stored bytes of the resolved entry.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes self, returning the stored bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Lazy iterator over the entries of a [`Book`], in manifest order.
///
/// Finite and restartable: a fresh iterator is returned by every call
/// to [`Book::entries`], and dropping one early releases nothing more
/// than the view itself.
#[derive(Clone, Debug)]
pub struct Entries<'book> {
    pub(crate) book: &'book Book,
    pub(crate) index: usize,
}

impl<'book> Iterator for Entries<'book> {
    type Item = Entry<'book>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.book.table.entries.get(self.index)?;
        self.index += 1;
        Some(Entry {
            book: self.book,
            data,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.book.table.entries.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Entries<'_> {}
