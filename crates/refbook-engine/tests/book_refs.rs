use std::path::PathBuf;

use pretty_assertions::assert_eq;
use refbook_engine::models::{Block, BlockKind, Document, SourceFile};
use refbook_engine::{Book, BookSettings, load_document};

fn srcdir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/book")
}

fn load(name: &str) -> (SourceFile, Document) {
    let source = SourceFile::from(name);
    let doc = load_document(&source, &srcdir()).unwrap();
    (source, doc)
}

fn lecture_book(appendices: &[&str]) -> Book {
    let mut book = Book::new(BookSettings {
        chapname: "Lecture".to_string(),
        ..BookSettings::default()
    });
    book.read(
        ["index.json", "01-sets.json", "02-proofs.json"].map(load),
        appendices.iter().map(|name| load(name)),
    );
    book
}

#[test]
fn chapter_blocks_carry_the_chapter_number() {
    let book = lecture_book(&[]);
    let refs = book.refs();

    assert_eq!(refs.resolve("01-sets", "def-set"), Some("Definition 1.1"));
    assert_eq!(refs.resolve("01-sets", "ex-union"), Some("Example 1.2"));
    assert_eq!(refs.resolve("01-sets", "fig-venn"), Some("Figure 1.1"));
}

#[test]
fn index_is_unnumbered_and_titled() {
    let book = lecture_book(&[]);
    let refs = book.refs();

    assert_eq!(refs.chapter_reference("index"), Some("Discrete Mathematics"));
    assert_eq!(refs.resolve("index", "tbl-schedule"), Some("Table 1"));
    assert_eq!(refs.chapter_reference("01-sets"), Some("Lecture 1"));
    assert_eq!(refs.chapter_reference("02-proofs"), Some("Lecture 2"));
}

#[test]
fn list_continues_across_documents() {
    let book = lecture_book(&[]);

    assert_eq!(book.refs().resolve("02-proofs", "step-six"), Some("6"));
    assert_eq!(book.refs().resolve("02-proofs", "step-seven"), Some("7"));
    let doc = book.document("02-proofs").unwrap();
    let marks: Vec<_> = doc
        .blocks()
        .filter_map(|(_, b)| b.mark.as_deref())
        .collect();
    assert_eq!(marks, vec!["6", "7"]);
}

#[test]
fn single_appendix_is_unlettered() {
    let book = lecture_book(&["app-a.json"]);

    assert_eq!(book.refs().chapter_reference("app-a"), Some("Appendix"));
    assert_eq!(book.refs().resolve("app-a", "ex-notation"), Some("Example A.1"));
}

#[test]
fn several_appendices_are_lettered() {
    let book = lecture_book(&["app-a.json", "app-b.json"]);
    let refs = book.refs();

    assert_eq!(refs.chapter_reference("app-a"), Some("Appendix A"));
    assert_eq!(refs.chapter_reference("app-b"), Some("Appendix B"));
    assert_eq!(refs.resolve("app-b", "tbl-answers"), Some("Table B.1"));
}

#[test]
fn link_targets_resolve_against_earlier_documents() {
    let book = lecture_book(&[]);

    let link = book.refs().resolve_target("01-sets.adoc#ex-union").unwrap();
    assert_eq!(link.href, "01-sets.html#ex-union");
    assert_eq!(link.text, "Example 1.2");

    let chapter = book.refs().resolve_target("02-proofs.adoc").unwrap();
    assert_eq!(chapter.text, "Lecture 2");
}

#[test]
fn reference_table_keeps_reading_order() {
    let book = lecture_book(&["app-a.json"]);

    let keys: Vec<_> = book.refs().documents().collect();
    assert_eq!(keys, vec!["index", "01-sets", "02-proofs", "app-a"]);
}

#[test]
fn extra_languages_are_collected_across_documents() {
    let mut book = Book::default();
    for (name, lang) in [("index.adoc", "haskell"), ("01.adoc", "prolog"), ("02.adoc", "rust")] {
        let mut doc = Document::empty();
        let root = doc.root();
        doc.push(
            root,
            Block::new(BlockKind::Listing)
                .with_style("source")
                .with_attr("language", lang),
        )
        .unwrap();
        book.add_chapter(SourceFile::from(name), doc);
    }

    let langs: Vec<_> = book.extra_languages().into_iter().collect();
    assert_eq!(langs, vec!["haskell", "prolog"]);
}
