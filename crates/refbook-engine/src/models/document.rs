use std::collections::{BTreeMap, BTreeSet};

use super::block::{Block, BlockId, BlockKind};

/// Anchor id to reftext, for one document.
pub type RefMap = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Duplicate anchor id: {0}")]
    DuplicateAnchor(String),
    #[error("Unknown block: {0:?}")]
    UnknownBlock(BlockId),
}

/// Scope in which block numerals restart.
///
/// `Chapter` and `Document` number identically: numerals run through the
/// whole document and carry the chapter label as prefix when there is one.
/// `Chapter` records that the label was assigned by a [`crate::Book`];
/// `Document` is the policy of a standalone document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberWithin {
    /// Numbered as a book chapter; the prefix is the chapter label.
    Chapter,
    /// Numerals restart at every top-level section; without a chapter label the
    /// section number is the prefix.
    Section,
    #[default]
    Document,
}

/// A parsed document: an arena of blocks plus the anchors that point into it.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Block>,
    root: BlockId,
    pub title: Option<String>,
    /// Chapter label used as numeral prefix ("1", "A"); `None` for unnumbered chapters.
    pub chapter: Option<String>,
    pub number_within: NumberWithin,
    anchors: BTreeMap<String, BlockId>,
    /// Anchors found in inline content, with their text if the author gave one.
    inline_anchors: BTreeMap<String, Option<String>>,
    extra_languages: BTreeSet<String>,
}

impl Document {
    pub fn new(root: Block) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: BlockId(0),
            title: None,
            chapter: None,
            number_within: NumberWithin::default(),
            anchors: BTreeMap::new(),
            inline_anchors: BTreeMap::new(),
            extra_languages: BTreeSet::new(),
        };
        if let Some(id) = root.id.clone() {
            doc.anchors.insert(id, BlockId(0));
        }
        doc.nodes.push(root);
        doc
    }

    /// An empty document with an `Other` root.
    pub fn empty() -> Self {
        Self::new(Block::new(BlockKind::Other))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter = Some(chapter.into());
        self
    }

    pub fn with_number_within(mut self, number_within: NumberWithin) -> Self {
        self.number_within = number_within;
        self
    }

    /// Appends `block` as the last child of `parent`.
    pub fn push(&mut self, parent: BlockId, block: Block) -> Result<BlockId, TreeError> {
        if parent.0 >= self.nodes.len() {
            return Err(TreeError::UnknownBlock(parent));
        }
        let id = BlockId(self.nodes.len());
        if let Some(anchor) = &block.id {
            if self.is_anchor(anchor) {
                return Err(TreeError::DuplicateAnchor(anchor.clone()));
            }
            self.anchors.insert(anchor.clone(), id);
        }
        self.nodes.push(block);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Registers an anchor that lives in inline content rather than on a block.
    pub fn add_inline_anchor(
        &mut self,
        id: impl Into<String>,
        text: Option<String>,
    ) -> Result<(), TreeError> {
        let id = id.into();
        if self.is_anchor(&id) {
            return Err(TreeError::DuplicateAnchor(id));
        }
        self.inline_anchors.insert(id, text);
        Ok(())
    }

    pub fn root(&self) -> BlockId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1 && self.nodes[0].children.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.nodes.get(id.0)
    }

    /// # Panics
    /// Panics if `id` does not belong to this document.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.nodes[id.0]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: BlockId) -> &[BlockId] {
        self.get(id).map(Block::children).unwrap_or(&[])
    }

    /// Blocks in arena (insertion) order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.nodes.iter().enumerate().map(|(i, b)| (BlockId(i), b))
    }

    pub fn is_anchor(&self, id: &str) -> bool {
        self.anchors.contains_key(id) || self.inline_anchors.contains_key(id)
    }

    pub fn find_anchor(&self, id: &str) -> Option<BlockId> {
        self.anchors.get(id).copied()
    }

    pub fn inline_anchor_text(&self, id: &str) -> Option<&str> {
        self.inline_anchors.get(id).and_then(|t| t.as_deref())
    }

    /// Gives `anchor` the label `reftext` unless it already has one.
    pub(crate) fn backfill_anchor(&mut self, anchor: &str, reftext: &str) -> bool {
        if let Some(id) = self.find_anchor(anchor) {
            let block = self.block_mut(id);
            if block.reftext.is_none() {
                block.reftext = Some(reftext.to_string());
                return true;
            }
        } else if let Some(text) = self.inline_anchors.get_mut(anchor)
            && text.is_none()
        {
            *text = Some(reftext.to_string());
            return true;
        }
        false
    }

    /// The chapter label when it should prefix numerals: empty and "0" do not.
    pub fn chapter_prefix(&self) -> Option<&str> {
        self.chapter
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "0")
    }

    pub(crate) fn register_language(&mut self, lang: &str) {
        if !self.extra_languages.contains(lang) {
            self.extra_languages.insert(lang.to_string());
        }
    }

    /// Source languages that the built-in highlighter bundle does not cover.
    pub fn extra_languages(&self) -> &BTreeSet<String> {
        &self.extra_languages
    }

    /// Whether the resolver has already run over the root.
    pub fn is_resolved(&self) -> bool {
        self.block(self.root).processed
    }

    /// Label of every anchor in the document.
    ///
    /// Blocks fall back to their title and then to `[id]`; inline anchors
    /// fall back to `[id]`.
    pub fn reference_map(&self) -> RefMap {
        let mut refs = RefMap::new();
        for (anchor, id) in &self.anchors {
            let block = self.block(*id);
            let text = block
                .reftext
                .clone()
                .or_else(|| block.title.clone())
                .unwrap_or_else(|| format!("[{anchor}]"));
            refs.insert(anchor.clone(), text);
        }
        for (anchor, text) in &self.inline_anchors {
            let text = text.clone().unwrap_or_else(|| format!("[{anchor}]"));
            refs.insert(anchor.clone(), text);
        }
        refs
    }

    /// Recorded end index of every anchored ordered list.
    pub fn list_ends(&self) -> BTreeMap<String, usize> {
        self.anchors
            .iter()
            .filter_map(|(anchor, id)| {
                let block = self.block(*id);
                if block.kind != BlockKind::OrderedList {
                    return None;
                }
                block
                    .list
                    .and_then(|l| l.item_count)
                    .map(|count| (anchor.clone(), count))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_preserves_child_order() {
        let mut doc = Document::empty();
        let root = doc.root();
        let a = doc.push(root, Block::new(BlockKind::Example)).unwrap();
        let b = doc.push(root, Block::new(BlockKind::Table)).unwrap();

        assert_eq!(doc.children(root), &[a, b]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_duplicate_anchor_rejected() {
        let mut doc = Document::empty();
        let root = doc.root();
        doc.push(root, Block::new(BlockKind::Example).with_id("thm"))
            .unwrap();

        let err = doc
            .push(root, Block::new(BlockKind::Table).with_id("thm"))
            .unwrap_err();
        assert_eq!(err, TreeError::DuplicateAnchor("thm".to_string()));

        let err = doc.add_inline_anchor("thm", None).unwrap_err();
        assert_eq!(err, TreeError::DuplicateAnchor("thm".to_string()));
    }

    #[test]
    fn test_push_to_unknown_parent() {
        let mut doc = Document::empty();
        let result = doc.push(BlockId(42), Block::new(BlockKind::Other));
        assert_eq!(result, Err(TreeError::UnknownBlock(BlockId(42))));
    }

    #[test]
    fn test_chapter_prefix_ignores_zero_and_empty() {
        assert_eq!(Document::empty().chapter_prefix(), None);
        assert_eq!(Document::empty().with_chapter("0").chapter_prefix(), None);
        assert_eq!(Document::empty().with_chapter("").chapter_prefix(), None);
        assert_eq!(Document::empty().with_chapter("2").chapter_prefix(), Some("2"));
        assert_eq!(Document::empty().with_chapter("B").chapter_prefix(), Some("B"));
    }

    #[test]
    fn test_reference_map_fallbacks() {
        let mut doc = Document::empty();
        let root = doc.root();
        doc.push(root, Block::section(1).with_id("intro").with_title("Introduction"))
            .unwrap();
        doc.push(root, Block::new(BlockKind::Other).with_id("bare"))
            .unwrap();
        doc.add_inline_anchor("inline-named", Some("Named".to_string()))
            .unwrap();
        doc.add_inline_anchor("inline-bare", None).unwrap();

        let refs = doc.reference_map();
        assert_eq!(refs["intro"], "Introduction");
        assert_eq!(refs["bare"], "[bare]");
        assert_eq!(refs["inline-named"], "Named");
        assert_eq!(refs["inline-bare"], "[inline-bare]");
    }

    #[test]
    fn test_backfill_only_fills_missing_labels() {
        let mut doc = Document::empty();
        let root = doc.root();
        let labelled = doc
            .push(root, Block::new(BlockKind::Other).with_id("labelled"))
            .unwrap();
        doc.block_mut(labelled).reftext = Some("Kept".to_string());
        doc.add_inline_anchor("inline", None).unwrap();

        assert!(!doc.backfill_anchor("labelled", "2(a)"));
        assert!(doc.backfill_anchor("inline", "2(a)"));
        assert!(!doc.backfill_anchor("inline", "3"));
        assert!(!doc.backfill_anchor("missing", "3"));

        assert_eq!(doc.block(labelled).reftext.as_deref(), Some("Kept"));
        assert_eq!(doc.inline_anchor_text("inline"), Some("2(a)"));
    }
}
