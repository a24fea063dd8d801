//! Identity and descriptive details of a [`Book`](crate::Book).

use std::fmt::{Display, Formatter};

/// The stable identifier of a [`Book`](crate::Book), sourced from the
/// `identifier` metadata entry of its manifest.
///
/// Identifier uniqueness is enforced across a
/// [`Library`](crate::Library): registering two books with the same
/// identifier fails with
/// [`DuplicateBook`](crate::library::errors::LibraryError::DuplicateBook).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(String);

impl BookId {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata details of a [`Book`](crate::Book), parsed from the
/// `metadata` element of its manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct BookMetadata {
    pub(crate) identifier: BookId,
    pub(crate) title: String,
    pub(crate) language: Option<String>,
}

impl BookMetadata {
    /// The stable [`BookId`] of the book.
    pub fn identifier(&self) -> &BookId {
        &self.identifier
    }

    /// The display title of the book.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The declared content language, if any (e.g., `en`).
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
