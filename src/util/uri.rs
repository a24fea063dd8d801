use crate::util;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

pub(crate) fn decode(encoded: &str) -> Cow<str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Canonical form of an entry URL: percent-decoded, normalized,
/// and absolute against the container root.
///
/// `img/../home%20page.html` -> `/home page.html`
pub(crate) fn canonicalize(href: &str) -> String {
    let decoded = decode(href);
    let normalized = normalize(decoded.as_ref());

    if normalized.starts_with('/') {
        normalized
    } else {
        util::str::prefix("/", &normalized)
    }
}

/// Strips the container-root slash so backends that resolve
/// against relative paths can locate the entry.
pub(crate) fn container_key(location: &str) -> &str {
    location.strip_prefix('/').unwrap_or(location)
}

fn normalize(href: &str) -> String {
    let mut buf = PathBuf::from(href);
    normalize_href_path(&mut buf);

    // 1: `buf` is UTF-8 as its data derives from `href`.
    // 2: Ensure separators are forward slashes.
    buf.to_string_lossy().replace('\\', "/")
}

fn normalize_href_path(original: &mut PathBuf) {
    let mut stack = Vec::new();

    for component in original.components() {
        match component {
            Component::ParentDir => {
                if stack
                    .last()
                    // If the component is the root, disallow popping.
                    // No content must come before the root when present.
                    .is_some_and(|component| !matches!(component, Component::RootDir))
                {
                    stack.pop();
                }
            }
            Component::CurDir => {}
            _ => {
                stack.push(component);
            }
        }
    }

    *original = PathBuf::from_iter(stack);
}

/// Filesystem form of a canonical location, for directory-backed books.
pub(crate) fn as_relative_path(location: &str) -> &Path {
    Path::new(container_key(location))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_canonicalize() {
        #[rustfmt::skip]
        let expected = [
            ("/home.html", "/home.html"),
            ("/home.html", "home.html"),
            ("/home.html", "./home.html"),
            ("/a/c.css", "/a/b/../c.css"),
            ("/c.css", "/a/../../c.css"),
            ("/home page.html", "/home%20page.html"),
            ("/img/logo.png", "img/./logo.png"),
        ];

        for (expect, href) in expected {
            assert_eq!(expect, super::canonicalize(href));
        }
    }

    #[test]
    fn test_container_key() {
        assert_eq!("home.html", super::container_key("/home.html"));
        assert_eq!("home.html", super::container_key("home.html"));
    }
}
