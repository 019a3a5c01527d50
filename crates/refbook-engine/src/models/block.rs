use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Index of a block in its document's arena.
///
/// Blocks own their children by id; nothing points back at a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The closed set of block kinds the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A section heading; `Block::level` holds its level (1 = top level).
    Section,
    /// Theorem-like environments (theorem, lemma, example, ...).
    #[serde(alias = "theorem")]
    Example,
    Table,
    #[serde(alias = "figure")]
    Image,
    /// Display math.
    #[serde(alias = "equation", alias = "stem")]
    Equation,
    /// Code listing.
    Listing,
    #[serde(alias = "olist")]
    OrderedList,
    #[serde(alias = "ulist")]
    UnorderedList,
    #[serde(alias = "dlist")]
    DescriptionList,
    #[serde(alias = "colist")]
    CalloutList,
    ListItem,
    /// Anything without numbering semantics (paragraphs, quotes, the document root).
    #[default]
    Other,
}

impl BlockKind {
    pub fn is_list(self) -> bool {
        matches!(
            self,
            BlockKind::OrderedList
                | BlockKind::UnorderedList
                | BlockKind::DescriptionList
                | BlockKind::CalloutList
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Section => "section",
            BlockKind::Example => "example",
            BlockKind::Table => "table",
            BlockKind::Image => "image",
            BlockKind::Equation => "equation",
            BlockKind::Listing => "listing",
            BlockKind::OrderedList => "ordered_list",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::DescriptionList => "description_list",
            BlockKind::CalloutList => "callout_list",
            BlockKind::ListItem => "list_item",
            BlockKind::Other => "other",
        }
    }
}

/// Well-known style values.
pub mod styles {
    pub const FIGLIST: &str = "figlist";
    pub const PSEUDOCODE: &str = "pseudocode";
    pub const BIBLIOGRAPHY: &str = "bibliography";
    pub const SOURCE: &str = "source";
}

/// Well-known attribute and option names.
pub mod attrs {
    pub const START: &str = "start";
    pub const CONTINUE_FROM: &str = "continue-from";
    pub const FORMAT: &str = "format";
    pub const LANGUAGE: &str = "language";
    pub const NUMBERED: &str = "numbered";
}

/// List facts recorded by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ListInfo {
    /// Nesting depth relative to enclosing lists (0 = outermost).
    pub depth: usize,
    /// Whether the list belongs to a flat (pseudocode) numbering sequence.
    pub flat: bool,
    /// Index one past the last item, used by later lists that continue this one.
    pub item_count: Option<usize>,
}

/// A node in a document tree.
///
/// The first group of fields comes from the parser; the second group is
/// written by [`crate::resolver::ReferenceResolver`] exactly once.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub kind: BlockKind,
    /// Section level; ignored for other kinds.
    pub level: u8,
    pub style: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    /// Rendered inline text, for list items.
    pub text: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub options: BTreeSet<String>,
    pub(crate) children: Vec<BlockId>,

    pub numeral: Option<u32>,
    pub reftext: Option<String>,
    pub mark: Option<String>,
    /// Label the serializer places before the title, e.g. "Theorem 2.1".
    pub caption_prefix: Option<String>,
    /// Render a caption even when the block has no title.
    pub show_caption: bool,
    pub list: Option<ListInfo>,
    pub(crate) processed: bool,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn section(level: u8) -> Self {
        Self::new(BlockKind::Section).with_level(level)
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>) -> Self {
        self.options.insert(name.into());
        self
    }

    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.style.as_deref() == Some(style)
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Whether this block takes a numeral from a counter.
    pub fn is_numbered(&self) -> bool {
        match self.kind {
            BlockKind::Example | BlockKind::Table | BlockKind::Image => true,
            BlockKind::Equation | BlockKind::Listing => self.has_option(attrs::NUMBERED),
            BlockKind::OrderedList => self.has_style(styles::FIGLIST),
            _ => false,
        }
    }

    /// Environment name used in the reftext ("figure", "lemma", ...).
    pub fn environment(&self) -> &str {
        match self.kind {
            BlockKind::Image => "figure",
            BlockKind::OrderedList if self.has_style(styles::FIGLIST) => "figure",
            BlockKind::Equation => "equation",
            BlockKind::Listing => "listing",
            kind => self.style.as_deref().unwrap_or(kind.as_str()),
        }
    }

    /// Zero-based offset derived from the 1-based `start` attribute.
    pub fn start_offset(&self) -> usize {
        self.attr(attrs::START)
            .and_then(|start| start.trim().parse::<i64>().ok())
            .map(|start| usize::try_from(start.saturating_sub(1)).unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn continue_from(&self) -> Option<&str> {
        self.attr(attrs::CONTINUE_FROM).filter(|v| !v.is_empty())
    }

    pub fn format_spec(&self) -> Option<&str> {
        self.attr(attrs::FORMAT).filter(|v| !v.is_empty())
    }

    /// Highlighting language of a source listing.
    pub fn source_language(&self) -> Option<&str> {
        if self.kind == BlockKind::Listing && self.has_style(styles::SOURCE) {
            self.attr(attrs::LANGUAGE).filter(|v| !v.is_empty())
        } else {
            None
        }
    }
}
