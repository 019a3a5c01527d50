//! Nested interchange form of a document tree.
//!
//! Parsers hand documents over as JSON; [`Document::from_tree`] flattens the
//! nesting into the arena and registers every anchor on the way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Block, BlockId, BlockKind, Document, TreeError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTree {
    pub kind: BlockKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockTree>,
}

impl BlockTree {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<BlockTree>) -> Self {
        self.children = children;
        self
    }

    /// Splits the node into its block and its children.
    fn into_parts(self) -> (Block, Vec<BlockTree>) {
        let mut block = Block::new(self.kind);
        block.level = self.level.unwrap_or(0);
        block.style = self.style;
        block.id = self.id;
        block.title = self.title;
        block.text = self.text;
        block.attributes = self.attributes;
        block.options = self.options.into_iter().collect();
        (block, self.children)
    }
}

/// A whole document as produced by a parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub root: BlockTree,
    /// Anchors found in inline content, with their text when the author wrote one.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inline_anchors: BTreeMap<String, Option<String>>,
}

impl Document {
    /// Builds a document from its nested form, children in order.
    pub fn from_tree(tree: DocumentTree) -> Result<Document, TreeError> {
        let (root, children) = tree.root.into_parts();
        let mut doc = Document::new(root);
        doc.title = tree.title;

        let mut stack: Vec<(BlockId, BlockTree)> = children
            .into_iter()
            .rev()
            .map(|child| (doc.root(), child))
            .collect();
        while let Some((parent, node)) = stack.pop() {
            let (block, children) = node.into_parts();
            let id = doc.push(parent, block)?;
            stack.extend(children.into_iter().rev().map(|child| (id, child)));
        }

        for (id, text) in tree.inline_anchors {
            doc.add_inline_anchor(id, text)?;
        }
        Ok(doc)
    }
}
