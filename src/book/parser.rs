//! `META-INF/book.xml` manifest parsing.

use crate::book::consts::manifest;
use crate::book::entry::{EntryData, EntryKindData};
use crate::book::errors::{FormatError, ManifestError};
use crate::book::metadata::BookMetadata;
use crate::book::MAX_REDIRECT_HOPS;
use crate::util::str::StringExt;
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};
use std::error::Error;

pub(crate) type ParserResult<T> = Result<T, FormatError>;

/// The fully parsed manifest of one book.
pub(crate) struct ManifestData {
    pub(crate) metadata: BookMetadata,
    /// Canonical URL of the designated landing entry.
    pub(crate) main_page: String,
    /// Entries in manifest order.
    pub(crate) entries: Vec<EntryData>,
}

pub(crate) fn parse_manifest(data: &[u8]) -> ParserResult<ManifestData> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut saw_book = false;
    let mut identifier = None;
    let mut title = None;
    let mut language = None;
    let mut main_page = None;
    let mut entries = Vec::new();
    let mut seen_hrefs = HashSet::new();

    loop {
        match reader.read_event().map_err(unparsable)? {
            Event::Eof => break,
            Event::Start(el) => match el.local_name().as_ref() {
                manifest::BOOK => saw_book = true,
                manifest::IDENTIFIER => identifier = Some(element_text(&mut reader, &el)?),
                manifest::TITLE => title = Some(element_text(&mut reader, &el)?),
                manifest::LANGUAGE => language = Some(element_text(&mut reader, &el)?),
                _ => parse_addressable(&el, &mut main_page, &mut entries, &mut seen_hrefs)?,
            },
            Event::Empty(el) => {
                parse_addressable(&el, &mut main_page, &mut entries, &mut seen_hrefs)?;
            }
            _ => {}
        }
    }

    if !saw_book {
        return Err(ManifestError::NoBookElement.into());
    }

    let metadata = BookMetadata {
        identifier: identifier
            .filter(|id| !id.is_empty())
            .ok_or(ManifestError::MissingIdentifier)?
            .into(),
        title: title
            .filter(|title| !title.is_empty())
            .ok_or(ManifestError::MissingTitle)?,
        language: language.filter(|language| !language.is_empty()),
    };

    let main_page = main_page.ok_or(ManifestError::NoMainPage)?;
    validate_main_page(&main_page, &entries)?;

    Ok(ManifestData {
        metadata,
        main_page,
        entries,
    })
}

/// The designated landing entry must reach stored content: a book
/// whose main page resolves to nothing is rejected at open rather
/// than failing on first retrieval.
fn validate_main_page(main_page: &str, entries: &[EntryData]) -> Result<(), ManifestError> {
    let by_href = entries
        .iter()
        .map(|entry| (entry.href.as_str(), &entry.kind))
        .collect::<HashMap<_, _>>();

    let mut location = main_page;
    for _ in 0..=MAX_REDIRECT_HOPS {
        match by_href.get(location) {
            Some(EntryKindData::Content { .. }) => return Ok(()),
            Some(EntryKindData::Redirect { target }) => location = target.as_str(),
            None => break,
        }
    }
    Err(ManifestError::DanglingMainPage(main_page.to_owned()))
}

/// Handles the `main-page`, `entry`, and `redirect` elements,
/// which may appear as either start or empty tags.
fn parse_addressable(
    el: &BytesStart,
    main_page: &mut Option<String>,
    entries: &mut Vec<EntryData>,
    seen_hrefs: &mut HashSet<String>,
) -> ParserResult<()> {
    let data = match el.local_name().as_ref() {
        manifest::MAIN_PAGE => {
            *main_page = Some(uri::canonicalize(&require_attribute(
                el,
                "main-page",
                "href",
                manifest::HREF,
            )?));
            return Ok(());
        }
        manifest::ENTRY => EntryData {
            href: uri::canonicalize(&require_attribute(el, "entry", "href", manifest::HREF)?),
            title: take_attribute(el, manifest::TITLE_ATTRIBUTE)?,
            kind: EntryKindData::Content {
                media_type: require_attribute(el, "entry", "media-type", manifest::MEDIA_TYPE)?,
            },
        },
        manifest::REDIRECT => EntryData {
            href: uri::canonicalize(&require_attribute(el, "redirect", "href", manifest::HREF)?),
            title: take_attribute(el, manifest::TITLE_ATTRIBUTE)?,
            kind: EntryKindData::Redirect {
                target: uri::canonicalize(&require_attribute(
                    el,
                    "redirect",
                    "target",
                    manifest::TARGET,
                )?),
            },
        },
        _ => return Ok(()),
    };

    if !seen_hrefs.insert(data.href.clone()) {
        return Err(ManifestError::DuplicateHref(data.href).into());
    }
    entries.push(data);
    Ok(())
}

fn element_text(reader: &mut Reader<&[u8]>, el: &BytesStart) -> ParserResult<String> {
    reader
        .read_text(el.name())
        .map(|text| {
            let mut text = text.into_owned();
            text.trim_in_place();
            text
        })
        .map_err(unparsable)
}

fn take_attribute(el: &BytesStart, name: &[u8]) -> ParserResult<Option<String>> {
    match el.try_get_attribute(name) {
        Ok(Some(attribute)) => attribute
            .unescape_value()
            .map(|value| Some(value.into_owned()))
            .map_err(unparsable),
        Ok(None) => Ok(None),
        Err(error) => Err(unparsable(error)),
    }
}

fn require_attribute(
    el: &BytesStart,
    element: &'static str,
    attribute: &'static str,
    name: &[u8],
) -> ParserResult<String> {
    take_attribute(el, name)?.ok_or_else(|| {
        ManifestError::MissingAttribute { element, attribute }.into()
    })
}

fn unparsable(error: impl Error + Send + Sync + 'static) -> FormatError {
    FormatError::Unparsable(Box::new(error))
}

#[cfg(test)]
mod tests {
    use super::parse_manifest;
    use crate::book::entry::EntryKindData;
    use crate::book::errors::{FormatError, ManifestError};

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <book version="1.0">
            <metadata>
                <identifier>urn:uuid:0001</identifier>
                <title>Example Book</title>
                <language>en</language>
            </metadata>
            <main-page href="/home.html"/>
            <entries>
                <entry href="/home.html" media-type="text/html" title="Home"/>
                <entry href="img/logo.png" media-type="image/png"/>
                <redirect href="/index.html" target="/home.html"/>
            </entries>
        </book>"#;

    #[test]
    fn test_parse_manifest() {
        let data = parse_manifest(MANIFEST.as_bytes()).unwrap();

        assert_eq!("urn:uuid:0001", data.metadata.identifier().as_str());
        assert_eq!("Example Book", data.metadata.title());
        assert_eq!(Some("en"), data.metadata.language());
        assert_eq!("/home.html", data.main_page);
        assert_eq!(3, data.entries.len());

        // Relative hrefs are made absolute
        assert_eq!("/img/logo.png", data.entries[1].href);
        assert_eq!(
            EntryKindData::Redirect {
                target: "/home.html".to_owned()
            },
            data.entries[2].kind,
        );
    }

    #[test]
    fn test_missing_identifier() {
        let manifest = r#"<book>
            <metadata><title>No Id</title></metadata>
            <main-page href="/home.html"/>
        </book>"#;

        assert!(matches!(
            parse_manifest(manifest.as_bytes()),
            Err(FormatError::Manifest(ManifestError::MissingIdentifier)),
        ));
    }

    #[test]
    fn test_missing_main_page() {
        let manifest = r#"<book>
            <metadata>
                <identifier>id</identifier>
                <title>No Main Page</title>
            </metadata>
        </book>"#;

        assert!(matches!(
            parse_manifest(manifest.as_bytes()),
            Err(FormatError::Manifest(ManifestError::NoMainPage)),
        ));
    }

    #[test]
    fn test_dangling_main_page() {
        let manifest = r#"<book>
            <metadata>
                <identifier>id</identifier>
                <title>Dangling</title>
            </metadata>
            <main-page href="/missing.html"/>
            <entries>
                <entry href="/home.html" media-type="text/html"/>
            </entries>
        </book>"#;

        assert!(matches!(
            parse_manifest(manifest.as_bytes()),
            Err(FormatError::Manifest(ManifestError::DanglingMainPage(href))) if href == "/missing.html",
        ));
    }

    #[test]
    fn test_main_page_through_redirect() {
        let manifest = r#"<book>
            <metadata>
                <identifier>id</identifier>
                <title>Aliased</title>
            </metadata>
            <main-page href="/index.html"/>
            <entries>
                <entry href="/home.html" media-type="text/html"/>
                <redirect href="/index.html" target="/home.html"/>
            </entries>
        </book>"#;

        let data = parse_manifest(manifest.as_bytes()).unwrap();
        assert_eq!("/index.html", data.main_page);
    }

    #[test]
    fn test_main_page_redirect_cycle() {
        let manifest = r#"<book>
            <metadata>
                <identifier>id</identifier>
                <title>Cycle</title>
            </metadata>
            <main-page href="/a.html"/>
            <entries>
                <redirect href="/a.html" target="/b.html"/>
                <redirect href="/b.html" target="/a.html"/>
            </entries>
        </book>"#;

        assert!(matches!(
            parse_manifest(manifest.as_bytes()),
            Err(FormatError::Manifest(ManifestError::DanglingMainPage(_))),
        ));
    }

    #[test]
    fn test_duplicate_href() {
        let manifest = r#"<book>
            <metadata>
                <identifier>id</identifier>
                <title>Duplicate</title>
            </metadata>
            <main-page href="/a.html"/>
            <entries>
                <entry href="/a.html" media-type="text/html"/>
                <entry href="a.html" media-type="text/html"/>
            </entries>
        </book>"#;

        assert!(matches!(
            parse_manifest(manifest.as_bytes()),
            Err(FormatError::Manifest(ManifestError::DuplicateHref(_))),
        ));
    }

    #[test]
    fn test_missing_book_element() {
        assert!(matches!(
            parse_manifest(b"<library></library>"),
            Err(FormatError::Manifest(ManifestError::NoBookElement)),
        ));
    }
}
