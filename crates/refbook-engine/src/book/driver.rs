use std::collections::BTreeSet;

use crate::models::{Document, NumberWithin, SourceFile};
use crate::resolver::{ReferenceResolver, ResolveReport};
use crate::walker::DEFAULT_MAX_DEPTH;

use super::{ChapterRole, CrossDocBook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSettings {
    /// Word used in chapter references ("Chapter 2", "Lecture 2").
    pub chapname: String,
    pub appendix_name: String,
    /// Number blocks within top-level sections in documents without a chapter label.
    pub sectnums: bool,
    pub max_depth: usize,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            chapname: "Chapter".to_string(),
            appendix_name: "Appendix".to_string(),
            sectnums: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

struct Entry {
    source: SourceFile,
    role: ChapterRole,
    document: Document,
}

/// Resolves documents in reading order and records their references.
pub struct Book {
    settings: BookSettings,
    resolver: ReferenceResolver,
    refs: CrossDocBook,
    entries: Vec<Entry>,
    chapters: u32,
    appendices: usize,
}

impl Book {
    pub fn new(settings: BookSettings) -> Self {
        let resolver = ReferenceResolver::with_max_depth(settings.max_depth);
        Self {
            settings,
            resolver,
            refs: CrossDocBook::new(),
            entries: Vec::new(),
            chapters: 0,
            appendices: 0,
        }
    }

    /// Adds the chapters, then the appendices, in order.
    pub fn read(
        &mut self,
        chapters: impl IntoIterator<Item = (SourceFile, Document)>,
        appendices: impl IntoIterator<Item = (SourceFile, Document)>,
    ) {
        for (source, document) in chapters {
            self.add_chapter(source, document);
        }
        for (source, document) in appendices {
            self.add_appendix(source, document);
        }
    }

    /// Adds a main-matter document. The index is only recognised as the first document.
    pub fn add_chapter(&mut self, source: SourceFile, document: Document) -> ResolveReport {
        let role = if self.entries.is_empty() && source.is_index() {
            ChapterRole::Index
        } else {
            self.chapters += 1;
            ChapterRole::Chapter(self.chapters)
        };
        self.add(source, role, document)
    }

    /// Adds an appendix. Earlier appendices are relabelled as the count grows.
    pub fn add_appendix(&mut self, source: SourceFile, document: Document) -> ResolveReport {
        let role = ChapterRole::Appendix {
            index: self.appendices,
            total: self.appendices + 1,
        };
        self.appendices += 1;
        let report = self.add(source, role, document);
        self.relabel_appendices();
        report
    }

    fn add(&mut self, source: SourceFile, role: ChapterRole, mut document: Document) -> ResolveReport {
        document.chapter = role.label();
        document.number_within = if document.chapter_prefix().is_some() {
            NumberWithin::Chapter
        } else if self.settings.sectnums {
            NumberWithin::Section
        } else {
            NumberWithin::Document
        };

        let report = self.resolver.resolve_in(&mut document, Some(&self.refs));
        log::info!(
            "resolved {} ({} blocks, {} numbered)",
            source.relative_path(),
            report.processed,
            report.numbered
        );

        let chapref = role.reference(
            document.title.as_deref(),
            &self.settings.chapname,
            &self.settings.appendix_name,
        );
        self.refs.record(source.key(), document.reference_map(), chapref);
        self.refs.record_lists(source.key(), document.list_ends());
        self.entries.push(Entry {
            source,
            role,
            document,
        });
        report
    }

    fn relabel_appendices(&mut self) {
        let total = self.appendices;
        for entry in &mut self.entries {
            let ChapterRole::Appendix { index, .. } = entry.role else {
                continue;
            };
            entry.role = ChapterRole::Appendix { index, total };
            if let Some(chapref) = entry.role.reference(
                entry.document.title.as_deref(),
                &self.settings.chapname,
                &self.settings.appendix_name,
            ) {
                self.refs.set_chapter_reference(entry.source.key(), chapref);
            }
        }
    }

    pub fn refs(&self) -> &CrossDocBook {
        &self.refs
    }

    pub fn document(&self, key: &str) -> Option<&Document> {
        self.entries
            .iter()
            .find(|e| e.source.key() == key)
            .map(|e| &e.document)
    }

    /// Documents in reading order.
    pub fn documents(&self) -> impl Iterator<Item = (&SourceFile, &Document)> {
        self.entries.iter().map(|e| (&e.source, &e.document))
    }

    pub fn role(&self, key: &str) -> Option<ChapterRole> {
        self.entries
            .iter()
            .find(|e| e.source.key() == key)
            .map(|e| e.role)
    }

    /// Union of every document's extra highlighter languages.
    pub fn extra_languages(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|e| e.document.extra_languages().iter().cloned())
            .collect()
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new(BookSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, BlockKind};
    use pretty_assertions::assert_eq;

    fn chapter_with_example(anchor: &str) -> Document {
        let mut doc = Document::empty();
        let root = doc.root();
        doc.push(root, Block::new(BlockKind::Example).with_id(anchor))
            .unwrap();
        doc
    }

    #[test]
    fn test_roles_follow_reading_order() {
        let mut book = Book::default();
        book.read(
            [
                (SourceFile::from("index.adoc"), Document::empty().with_title("Notes")),
                (SourceFile::from("01-intro.adoc"), chapter_with_example("thm")),
            ],
            [(SourceFile::from("app-proofs.adoc"), chapter_with_example("proof"))],
        );

        assert_eq!(book.role("index"), Some(ChapterRole::Index));
        assert_eq!(book.role("01-intro"), Some(ChapterRole::Chapter(1)));
        assert_eq!(book.refs().chapter_reference("index"), Some("Notes"));
        assert_eq!(book.refs().resolve("01-intro", "thm"), Some("Example 1.1"));
        assert_eq!(book.refs().chapter_reference("app-proofs"), Some("Appendix"));
        assert_eq!(book.refs().resolve("app-proofs", "proof"), Some("Example A.1"));
    }

    #[test]
    fn test_second_appendix_relabels_first() {
        let mut book = Book::default();
        book.add_appendix(SourceFile::from("a.adoc"), Document::empty());
        assert_eq!(book.refs().chapter_reference("a"), Some("Appendix"));

        book.add_appendix(SourceFile::from("b.adoc"), Document::empty());
        assert_eq!(book.refs().chapter_reference("a"), Some("Appendix A"));
        assert_eq!(book.refs().chapter_reference("b"), Some("Appendix B"));
    }

    #[test]
    fn test_book_without_index_numbers_from_one() {
        let mut book = Book::new(BookSettings {
            chapname: "Lecture".to_string(),
            ..BookSettings::default()
        });
        book.add_chapter(SourceFile::from("first.adoc"), Document::empty());

        assert_eq!(book.refs().chapter_reference("first"), Some("Lecture 1"));
    }

    #[test]
    fn test_sectnums_applies_to_unlabelled_documents() {
        let mut book = Book::new(BookSettings {
            sectnums: true,
            ..BookSettings::default()
        });
        let mut index = Document::empty();
        let root = index.root();
        let section = index.push(root, Block::section(1)).unwrap();
        index
            .push(section, Block::new(BlockKind::Table).with_id("tbl"))
            .unwrap();
        book.add_chapter(SourceFile::from("index.adoc"), index);
        book.add_chapter(SourceFile::from("01.adoc"), chapter_with_example("thm"));

        assert_eq!(book.refs().resolve("index", "tbl"), Some("Table 1.1"));
        assert_eq!(book.refs().resolve("01", "thm"), Some("Example 1.1"));
        assert_eq!(
            book.document("01").map(|d| d.number_within),
            Some(NumberWithin::Chapter)
        );
    }
}
