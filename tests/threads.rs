mod common;

use bookstack::{BookId, Library};
use common::BookFixture;
use std::sync::Arc;
use std::thread;

fn numbered_book(index: usize) -> bookstack::Book {
    BookFixture::new(&format!("urn:uuid:thread-{index:02}"), "Threaded")
        .entry(
            "/home.html",
            "text/html",
            Some("Home"),
            b"<html><body>shared content</body></html>",
        )
        .open()
}

#[test]
fn test_parallel_reads_of_one_book() {
    let library = Arc::new(Library::new());
    let id = library.add_book(numbered_book(0)).unwrap();

    thread::scope(|scope| {
        for _ in 0..8 {
            let library = Arc::clone(&library);
            let id = id.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    let content = library.content(&id, "/home.html").unwrap();
                    assert_eq!(
                        b"<html><body>shared content</body></html>".as_slice(),
                        content.bytes(),
                    );
                }
            });
        }
    });
}

#[test]
fn test_reads_interleaved_with_registration() {
    let library = Arc::new(Library::new());
    let id = library.add_book(numbered_book(0)).unwrap();

    thread::scope(|scope| {
        // Readers of a stable book
        for _ in 0..4 {
            let library = Arc::clone(&library);
            let id = id.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    library.content(&id, "/home.html").unwrap();
                    library.search("shared");
                    library.suggestions("home");
                }
            });
        }

        // Writers churning other books
        for worker in 0..2 {
            let library = Arc::clone(&library);
            scope.spawn(move || {
                for round in 0..10 {
                    let index = 1 + worker * 10 + round;
                    let added = library.add_book(numbered_book(index)).unwrap();
                    library.remove(&added).unwrap();
                }
            });
        }
    });

    // Only the stable book remains
    assert_eq!(vec![BookId::from("urn:uuid:thread-00")], library.ids());
}
