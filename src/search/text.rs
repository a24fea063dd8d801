//! Plain-text extraction from indexable entry content.

use crate::book::errors::FormatError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Elements whose text carries no searchable prose.
const SKIPPED_ELEMENTS: [&[u8]; 2] = [b"script", b"style"];

/// Collects the visible text of an HTML/XHTML document.
///
/// Markup is read in relaxed mode; mismatched end tags, common in
/// hand-written HTML, do not fail extraction.
pub(crate) fn html_text(data: &[u8]) -> Result<String, FormatError> {
    let mut reader = Reader::from_reader(data);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;

    let mut text = String::new();
    let mut skip_depth = 0usize;

    loop {
        match reader
            .read_event()
            .map_err(|error| FormatError::Unparsable(Box::new(error)))?
        {
            Event::Eof => break,
            Event::Start(el) if is_skipped(el.local_name().as_ref()) => skip_depth += 1,
            Event::End(el) if is_skipped(el.local_name().as_ref()) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(content) if skip_depth == 0 => {
                let decoded = content
                    .decode()
                    .unwrap_or_else(|_| String::from_utf8_lossy(content.as_ref()));

                if !decoded.is_empty() {
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(&decoded);
                }
            }
            _ => {}
        }
    }
    Ok(text)
}

fn is_skipped(local_name: &[u8]) -> bool {
    SKIPPED_ELEMENTS.contains(&local_name)
}
