use relative_path::RelativePathBuf;

use crate::models::SourceFile;

/// Reserved anchor under which a document's chapter-level reference is recorded.
pub const CHAPREF: &str = "chapref";

/// A `document#anchor` link target.
///
/// The document part may carry a directory and an extension
/// (`chapters/01-intro.adoc#thm-main`); a missing anchor refers to the
/// document as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRef {
    source: SourceFile,
    anchor: String,
}

impl CrossRef {
    pub fn parse(target: &str) -> Self {
        let (document, anchor) = target.split_once('#').unwrap_or((target, ""));
        let anchor = if anchor.is_empty() { CHAPREF } else { anchor };
        Self {
            source: SourceFile::from_relative_str(document),
            anchor: anchor.to_string(),
        }
    }

    /// Key of the referenced document.
    pub fn document(&self) -> &str {
        self.source.key()
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn is_chapter_reference(&self) -> bool {
        self.anchor == CHAPREF
    }

    /// Link to the rendered page, with a fragment unless the whole document is meant.
    pub fn href(&self) -> String {
        let page: RelativePathBuf = self.source.output_path();
        if self.is_chapter_reference() {
            page.into_string()
        } else {
            format!("{page}#{}", self.anchor)
        }
    }
}
