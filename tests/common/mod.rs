//! Shared fixtures: in-memory book containers assembled with the
//! `zip` writer, mirroring the on-disk layout.

use bookstack::Book;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Declarative builder for a zipped book container.
pub struct BookFixture {
    identifier: String,
    title: String,
    language: Option<String>,
    main_page: String,
    manifest_entries: Vec<String>,
    files: Vec<(String, Vec<u8>)>,
}

#[allow(dead_code)] // Not every test file exercises every helper.
impl BookFixture {
    pub fn new(identifier: &str, title: &str) -> Self {
        Self {
            identifier: identifier.to_owned(),
            title: title.to_owned(),
            language: None,
            main_page: "/home.html".to_owned(),
            manifest_entries: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_owned());
        self
    }

    pub fn main_page(mut self, href: &str) -> Self {
        self.main_page = href.to_owned();
        self
    }

    /// A content entry: listed in the manifest and stored in the zip.
    pub fn entry(mut self, href: &str, media_type: &str, title: Option<&str>, bytes: &[u8]) -> Self {
        let title_attribute = title
            .map(|title| format!(" title=\"{title}\""))
            .unwrap_or_default();
        self.manifest_entries.push(format!(
            "<entry href=\"{href}\" media-type=\"{media_type}\"{title_attribute}/>"
        ));
        self.files
            .push((href.trim_start_matches('/').to_owned(), bytes.to_vec()));
        self
    }

    /// A content entry listed in the manifest with no stored bytes.
    pub fn phantom_entry(mut self, href: &str, media_type: &str) -> Self {
        self.manifest_entries.push(format!(
            "<entry href=\"{href}\" media-type=\"{media_type}\"/>"
        ));
        self
    }

    /// A redirect alias.
    pub fn redirect(mut self, href: &str, target: &str) -> Self {
        self.manifest_entries
            .push(format!("<redirect href=\"{href}\" target=\"{target}\"/>"));
        self
    }

    /// A zip member absent from the manifest; must not be addressable.
    pub fn unlisted_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files
            .push((path.trim_start_matches('/').to_owned(), bytes.to_vec()));
        self
    }

    pub fn manifest_xml(&self) -> String {
        let language = self
            .language
            .as_ref()
            .map(|language| format!("<language>{language}</language>"))
            .unwrap_or_default();

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <book version=\"1.0\">\
             <metadata>\
             <identifier>{}</identifier>\
             <title>{}</title>\
             {language}\
             </metadata>\
             <main-page href=\"{}\"/>\
             <entries>{}</entries>\
             </book>",
            self.identifier,
            self.title,
            self.main_page,
            self.manifest_entries.concat(),
        )
    }

    /// The zipped container bytes.
    pub fn bytes(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer
            .start_file("META-INF/book.xml", options)
            .expect("start manifest");
        writer
            .write_all(self.manifest_xml().as_bytes())
            .expect("write manifest");

        for (path, bytes) in &self.files {
            writer.start_file(path.as_str(), options).expect("start entry");
            writer.write_all(bytes).expect("write entry");
        }
        writer.finish().expect("finish container").into_inner()
    }

    /// Opens the fixture as an in-memory [`Book`].
    pub fn open(&self) -> Book {
        Book::read(Cursor::new(self.bytes())).expect("fixture should open")
    }

    /// Writes the fixture as a zipped `.book` file.
    pub fn write_file(&self, path: &Path) {
        fs::write(path, self.bytes()).expect("write book file");
    }

    /// Writes the fixture as an unzipped directory container.
    pub fn write_dir(&self, dir: &Path) {
        let meta_inf = dir.join("META-INF");
        fs::create_dir_all(&meta_inf).expect("create META-INF");
        fs::write(meta_inf.join("book.xml"), self.manifest_xml()).expect("write manifest");

        for (path, bytes) in &self.files {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).expect("create entry directory");
            }
            fs::write(target, bytes).expect("write entry file");
        }
    }
}

/// The standard single-book fixture most tests start from.
#[allow(dead_code)]
pub fn example_book() -> BookFixture {
    BookFixture::new("urn:uuid:example-0001", "Example Book")
        .language("en")
        .entry(
            "/home.html",
            "text/html",
            Some("Home"),
            b"<html><body>Welcome home</body></html>",
        )
        .entry("/img/logo.png", "image/png", None, &[0x89, 0x50, 0x4e, 0x47])
        .redirect("/index.html", "/home.html")
}
