pub(crate) mod manifest {
    /// Canonical location of the book manifest within a container.
    pub(crate) const LOCATION: &str = "/META-INF/book.xml";

    pub(crate) const BOOK: &[u8] = b"book";
    pub(crate) const IDENTIFIER: &[u8] = b"identifier";
    pub(crate) const TITLE: &[u8] = b"title";
    pub(crate) const LANGUAGE: &[u8] = b"language";
    pub(crate) const MAIN_PAGE: &[u8] = b"main-page";
    pub(crate) const ENTRY: &[u8] = b"entry";
    pub(crate) const REDIRECT: &[u8] = b"redirect";

    pub(crate) const HREF: &[u8] = b"href";
    pub(crate) const TARGET: &[u8] = b"target";
    pub(crate) const MEDIA_TYPE: &[u8] = b"media-type";
    pub(crate) const TITLE_ATTRIBUTE: &[u8] = b"title";
}

pub(crate) mod mime {
    pub(crate) const HTML: &str = "text/html";
    pub(crate) const XHTML: &str = "application/xhtml+xml";
    pub(crate) const TEXT_PREFIX: &str = "text/";
}
