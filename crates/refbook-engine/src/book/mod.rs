//! # Books
//!
//! A book is an ordered set of documents: the index, numbered chapters and
//! lettered appendices. Documents are resolved strictly in reading order and
//! their reference maps are recorded in a [`CrossDocBook`], so later chapters
//! can label `document#anchor` links and continue lists started elsewhere.
//!
//! ## Modules
//!
//! - **`chapters`**: chapter roles, numeral labels and chapter-level references
//! - **`crossref`**: parsing of `document#anchor` link targets
//! - **`driver`**: [`Book`], which resolves and records documents

pub mod chapters;
pub mod crossref;
pub mod driver;

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::RefMap;

pub use chapters::{ChapterRole, appendix_letter};
pub use crossref::{CHAPREF, CrossRef};
pub use driver::{Book, BookSettings};

/// A link target resolved against the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink<'a> {
    pub href: String,
    pub text: &'a str,
}

/// Document key to {anchor id to reftext}, in reading order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CrossDocBook {
    refs: IndexMap<String, RefMap>,
    #[serde(skip)]
    list_ends: HashMap<String, BTreeMap<String, usize>>,
}

impl CrossDocBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document's reference map, plus its chapter reference under
    /// [`CHAPREF`]. Recording a key again replaces the entry in place.
    pub fn record(&mut self, key: impl Into<String>, mut refs: RefMap, chapref: Option<String>) {
        if let Some(chapref) = chapref {
            refs.insert(CHAPREF.to_string(), chapref);
        }
        self.refs.insert(key.into(), refs);
    }

    /// Replaces the chapter reference of a recorded document.
    pub(crate) fn set_chapter_reference(&mut self, key: &str, chapref: String) {
        if let Some(refs) = self.refs.get_mut(key) {
            refs.insert(CHAPREF.to_string(), chapref);
        }
    }

    /// Stores where the anchored ordered lists of a document end.
    pub fn record_lists(&mut self, key: impl Into<String>, ends: BTreeMap<String, usize>) {
        self.list_ends.insert(key.into(), ends);
    }

    pub fn resolve(&self, key: &str, anchor: &str) -> Option<&str> {
        self.refs.get(key)?.get(anchor).map(String::as_str)
    }

    pub fn chapter_reference(&self, key: &str) -> Option<&str> {
        self.resolve(key, CHAPREF)
    }

    /// Item count of list `anchor` in document `key`, if that list was recorded.
    pub fn list_end(&self, key: &str, anchor: &str) -> Option<usize> {
        self.list_ends.get(key)?.get(anchor).copied()
    }

    /// Href and label for a `document#anchor` target.
    pub fn resolve_target(&self, target: &str) -> Option<ResolvedLink<'_>> {
        let cref = CrossRef::parse(target);
        let text = self.resolve(cref.document(), cref.anchor())?;
        Some(ResolvedLink {
            href: cref.href(),
            text,
        })
    }

    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.refs.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&RefMap> {
        self.refs.get(key)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
