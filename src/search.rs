//! Full-text search and query auto-completion over books.
//!
//! # Overview
//! Each registered book carries an in-memory inverted index over its
//! textual entries, built when the book is added to a
//! [`Library`](crate::Library). Two query surfaces exist:
//! - [Suggestions](Suggestion): lightweight title/URL pairs for
//!   auto-complete, matched against entry titles. Suggestions never
//!   depend on the index and remain available when an index fails
//!   to build.
//! - [Results](SearchResult): ranked full-text matches with snippets.
//!
//! Empty terms and terms with no matches produce empty sequences,
//! never errors.

pub(crate) mod text;

use crate::book::consts::mime;
use crate::book::entry::EntryKind;
use crate::book::errors::BookResult;
use crate::book::metadata::BookId;
use crate::book::Book;
use std::cmp::Ordering;
use std::collections::HashMap;

/// The maximum number of [`Suggestions`](Suggestion) a query yields.
pub const MAX_SUGGESTIONS: usize = 20;

/// Tokens shorter than this are not indexed or queried.
const MIN_TOKEN_LEN: usize = 2;

/// Words of context kept around a match when building a snippet.
const SNIPPET_CONTEXT_WORDS: usize = 8;

/// A lightweight title/URL pair for query auto-complete,
/// distinct from full [`SearchResult`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    pub(crate) title: String,
    pub(crate) href: String,
    pub(crate) weight: u32,
}

impl Suggestion {
    /// The title of the suggested entry.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The canonical URL of the suggested entry.
    pub fn href(&self) -> &str {
        &self.href
    }
}

/// One ranked full-text match.
///
/// Results order by descending [`score`](Self::score); ties break by
/// `(book, href)` ascending for determinism.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub(crate) book: BookId,
    pub(crate) href: String,
    pub(crate) title: Option<String>,
    pub(crate) score: u32,
    pub(crate) snippet: Option<String>,
}

impl SearchResult {
    /// The book this match was found in.
    pub fn book(&self) -> &BookId {
        &self.book
    }

    /// The canonical URL of the matched entry.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The title of the matched entry, if its manifest declares one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The relevance score: the summed frequency of every query
    /// token within the entry.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// A short text excerpt around the first match.
    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }
}

/// A full-text match before its owning book is known.
pub(crate) struct Hit {
    pub(crate) href: String,
    pub(crate) title: Option<String>,
    pub(crate) score: u32,
    pub(crate) snippet: Option<String>,
}

struct Doc {
    href: String,
    title: Option<String>,
    /// Extracted prose, kept for snippet assembly.
    text: String,
}

struct Posting {
    doc: u32,
    count: u32,
}

/// An in-memory inverted index over the textual entries of one book.
pub(crate) struct SearchIndex {
    docs: Vec<Doc>,
    postings: HashMap<String, Vec<Posting>>,
}

impl SearchIndex {
    /// Indexes every non-redirect `text/*` (and XHTML) entry of `book`.
    ///
    /// # Errors
    /// [`BookError`](crate::book::errors::BookError): An indexable
    /// entry could not be read or its markup could not be parsed.
    pub(crate) fn build(book: &Book) -> BookResult<Self> {
        let mut docs = Vec::new();
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();

        for entry in book.entries() {
            let EntryKind::Content { media_type } = entry.kind() else {
                continue;
            };
            if !is_indexable(media_type) {
                continue;
            }

            let bytes = book.entry_bytes(entry.href())?;
            let text = if is_markup(media_type) {
                text::html_text(&bytes)?
            } else {
                String::from_utf8_lossy(&bytes).into_owned()
            };

            let doc = u32::try_from(docs.len()).unwrap_or(u32::MAX);
            let mut counts: HashMap<String, u32> = HashMap::new();
            for token in tokenize(&text) {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (token, count) in counts {
                postings.entry(token).or_default().push(Posting { doc, count });
            }
            docs.push(Doc {
                href: entry.href().to_owned(),
                title: entry.title().map(str::to_owned),
                text,
            });
        }
        Ok(Self { docs, postings })
    }

    /// Ranked full-text matches for `term` within this book,
    /// ordered by score descending then URL ascending.
    pub(crate) fn search(&self, term: &str) -> Vec<Hit> {
        let tokens = query_tokens(term);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scores: HashMap<u32, u32> = HashMap::new();
        for token in &tokens {
            if let Some(postings) = self.postings.get(token) {
                for posting in postings {
                    *scores.entry(posting.doc).or_insert(0) += posting.count;
                }
            }
        }

        let mut hits = scores
            .into_iter()
            .map(|(doc, score)| {
                let doc = &self.docs[doc as usize];
                Hit {
                    href: doc.href.clone(),
                    title: doc.title.clone(),
                    score,
                    snippet: snippet(&doc.text, &tokens),
                }
            })
            .collect::<Vec<_>>();

        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.href.cmp(&b.href))
        });
        hits
    }
}

/// Title-prefix suggestions for `term` within one book.
///
/// Matching is case-insensitive: a whole-title prefix outranks a
/// word-boundary prefix. Works straight off the entry table, so
/// suggestions survive an unavailable [`SearchIndex`].
pub(crate) fn suggest(book: &Book, term: &str) -> Vec<Suggestion> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut suggestions = Vec::new();
    for entry in book.entries() {
        let Some(title) = entry.title() else {
            continue;
        };
        let lowered = title.to_lowercase();

        let weight = if lowered.starts_with(&needle) {
            2
        } else if lowered
            .split_whitespace()
            .any(|word| word.starts_with(&needle))
        {
            1
        } else {
            continue;
        };
        suggestions.push(Suggestion {
            title: title.to_owned(),
            href: entry.href().to_owned(),
            weight,
        });
    }

    sort_suggestions(&mut suggestions);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Relevance descending, then title and URL ascending.
pub(crate) fn sort_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.href.cmp(&b.href))
    });
}

/// Score descending, then `(book, href)` ascending.
pub(crate) fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| match a.book.cmp(&b.book) {
                Ordering::Equal => a.href.cmp(&b.href),
                ordering => ordering,
            })
    });
}

fn is_indexable(media_type: &str) -> bool {
    media_type.starts_with(mime::TEXT_PREFIX) || media_type == mime::XHTML
}

fn is_markup(media_type: &str) -> bool {
    media_type == mime::HTML || media_type == mime::XHTML
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
}

/// Deduplicated, sorted query tokens so repeated words do not
/// double-count.
fn query_tokens(term: &str) -> Vec<String> {
    let mut tokens = tokenize(term).collect::<Vec<_>>();
    tokens.sort();
    tokens.dedup();
    tokens
}

fn snippet(text: &str, tokens: &[String]) -> Option<String> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    let position = words.iter().position(|word| {
        let lowered = word.to_lowercase();
        tokens.iter().any(|token| lowered.contains(token.as_str()))
    })?;

    let start = position.saturating_sub(SNIPPET_CONTEXT_WORDS);
    let end = (position + SNIPPET_CONTEXT_WORDS + 1).min(words.len());
    let mut excerpt = words[start..end].join(" ");

    if start > 0 {
        excerpt = crate::util::str::prefix("… ", &excerpt);
    }
    if end < words.len() {
        excerpt.push_str(" …");
    }
    Some(excerpt)
}

#[cfg(test)]
mod tests {
    use super::{query_tokens, snippet, tokenize};

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("The quick-brown FOX, f 42!").collect::<Vec<_>>();
        assert_eq!(vec!["the", "quick", "brown", "fox", "42"], tokens);
    }

    #[test]
    fn test_query_tokens_dedup() {
        assert_eq!(vec!["fox"], query_tokens("fox FOX fox"));
        assert!(query_tokens("").is_empty());
        assert!(query_tokens("  a ").is_empty());
    }

    #[test]
    fn test_snippet_window() {
        let text = "one two three four five six seven eight nine ten \
                    eleven MATCH twelve thirteen";
        let excerpt = snippet(text, &["match".to_owned()]).unwrap();

        assert!(excerpt.starts_with("… "));
        assert!(excerpt.contains("MATCH"));
        assert!(excerpt.contains("four"));
        assert!(!excerpt.contains("one"));
    }

    #[test]
    fn test_snippet_no_match() {
        assert_eq!(None, snippet("alpha beta", &["gamma".to_owned()]));
    }
}
