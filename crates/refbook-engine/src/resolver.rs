//! # Reference resolution
//!
//! One pass over a document that stamps every block with the facts the
//! serializer and the book need:
//!
//! - **numerals and reftext** for numbered blocks (theorems, tables, figures,
//!   numbered equations and listings), e.g. "Theorem 2.3" or "(4)";
//! - **list marks** for the items of ordered, unordered and callout lists, and
//!   reftext such as "2(a)" for ordered items;
//! - **extra highlighter languages** used by source listings.
//!
//! The pass is driven by [`TreeWalker`]. Explore/retreat moves maintain the
//! ordered-list nesting depth and the state of a flat (pseudocode) list, whose
//! items are numbered as one sequence regardless of nesting. Other list kinds
//! do not change the depth.
//!
//! ```text
//! outside-list --explore ordered list--> inside-list(depth + 1)
//! inside-list  --retreat ordered item--> inside-list(depth - 1) | outside-list
//! outside-list --pseudocode list at depth 0--> inside-flat-list
//! inside-flat-list --retreat that list--> outside-list (item count stamped)
//! ```
//!
//! Every block carries a processed flag, so resolving a tree twice changes nothing.

use std::sync::OnceLock;

use regex::Regex;

use crate::book::{CrossDocBook, CrossRef};
use crate::highlight;
use crate::marks::{self, MarkFormat};
use crate::models::block::styles;
use crate::models::{BlockId, BlockKind, Document, ListInfo, NumberWithin};
use crate::numbering::{Counter, NumberingRegistry};
use crate::walker::{DEFAULT_MAX_DEPTH, Move, TreeWalker};

/// Counts from one resolver pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Blocks processed in this pass (0 when the tree was already resolved).
    pub processed: usize,
    pub numbered: usize,
    /// Blocks whose children lay beyond the depth bound.
    pub truncated: usize,
}

#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    max_depth: usize,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Resolves a standalone document.
    pub fn resolve(&self, doc: &mut Document) -> ResolveReport {
        self.resolve_in(doc, None)
    }

    /// Resolves a document of a book; `book` holds the documents recorded so
    /// far and answers `document#anchor` list continuations.
    pub fn resolve_in(&self, doc: &mut Document, book: Option<&CrossDocBook>) -> ResolveReport {
        let mut pass = Pass::new(book);
        let mut walker = TreeWalker::with_max_depth(doc.root(), self.max_depth);

        while let Some(id) = walker.current() {
            if !doc.block(id).processed {
                pass.process(doc, id, &walker);
                doc.block_mut(id).processed = true;
                pass.report.processed += 1;
            }

            let step = Step {
                block: id,
                is_ordered_list: doc.block(id).kind == BlockKind::OrderedList,
                in_ordered_list: walker
                    .parent()
                    .is_some_and(|p| doc.block(p).kind == BlockKind::OrderedList),
            };
            walker.advance(doc, |mv| pass.on_move(mv, step));
            pass.stamp_finished_flat_list(doc);
        }

        pass.report.truncated = walker.truncated();
        if pass.report.truncated > 0 {
            log::warn!(
                "{} block(s) nest deeper than {} levels; their contents were not resolved",
                pass.report.truncated,
                self.max_depth
            );
        }
        pass.report
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    block: BlockId,
    is_ordered_list: bool,
    in_ordered_list: bool,
}

#[derive(Debug, Clone)]
struct FlatList {
    list: BlockId,
    format: MarkFormat,
    next_index: usize,
}

/// State of one walk over one document.
struct Pass<'a> {
    book: Option<&'a CrossDocBook>,
    registry: NumberingRegistry,
    /// Top-level sections seen so far (within-section numbering only).
    section: u32,
    list_depth: usize,
    flat: Option<FlatList>,
    finished_flat: Option<(BlockId, usize)>,
    report: ResolveReport,
}

impl<'a> Pass<'a> {
    fn new(book: Option<&'a CrossDocBook>) -> Self {
        Self {
            book,
            registry: NumberingRegistry::new(),
            section: 0,
            list_depth: 0,
            flat: None,
            finished_flat: None,
            report: ResolveReport::default(),
        }
    }

    fn on_move(&mut self, mv: Move, step: Step) {
        match mv {
            Move::Explore => {
                if step.is_ordered_list {
                    self.list_depth += 1;
                }
            }
            Move::Retreat => {
                if step.in_ordered_list {
                    self.list_depth = self.list_depth.saturating_sub(1);
                }
                if self.flat.as_ref().is_some_and(|f| f.list == step.block) {
                    self.finished_flat = self.flat.take().map(|f| (f.list, f.next_index));
                }
            }
        }
    }

    fn stamp_finished_flat_list(&mut self, doc: &mut Document) {
        if let Some((list, count)) = self.finished_flat.take()
            && let Some(info) = doc.block_mut(list).list.as_mut()
        {
            info.item_count = Some(count);
        }
    }

    fn process(&mut self, doc: &mut Document, id: BlockId, walker: &TreeWalker) {
        if doc.block(id).is_numbered() {
            self.number(doc, id);
        }

        match doc.block(id).kind {
            BlockKind::Section => {
                if doc.block(id).level == 1 && doc.number_within == NumberWithin::Section {
                    self.section += 1;
                    self.registry.reset();
                }
            }
            BlockKind::OrderedList => self.ordered_list(doc, id, walker),
            BlockKind::UnorderedList => self.unordered_list(doc, id),
            BlockKind::DescriptionList => self.set_list_info(doc, id, self.list_depth, false),
            BlockKind::CalloutList => self.callout_list(doc, id),
            BlockKind::ListItem => {
                let in_ordered = walker
                    .parent()
                    .is_some_and(|p| doc.block(p).kind == BlockKind::OrderedList);
                if in_ordered && self.flat.is_some() {
                    self.flat_item(doc, id);
                }
            }
            BlockKind::Listing => {
                if let Some(lang) = doc.block(id).source_language()
                    && !highlight::is_included(lang)
                {
                    let lang = lang.to_string();
                    doc.register_language(&lang);
                }
            }
            _ => {}
        }
    }

    fn number(&mut self, doc: &mut Document, id: BlockId) {
        let block = doc.block(id);
        let Some(counter) = Counter::for_block(block) else {
            debug_assert!(false, "numbered block without a counter: {:?}", block.kind);
            return;
        };
        let numeral = self.registry.assign(counter);
        let relative = self.relative_numeral(doc, numeral);
        let is_equation = block.kind == BlockKind::Equation;
        let reftext = if is_equation {
            format!("({relative})")
        } else {
            format!("{} {relative}", capitalize(block.environment()))
        };
        log::debug!("{} {:?} -> {reftext}", counter.name(), block.id);

        let block = doc.block_mut(id);
        block.numeral = Some(numeral);
        block.show_caption = !is_equation;
        if block.kind == BlockKind::Example {
            block.caption_prefix = Some(reftext.clone());
        }
        block.reftext = Some(reftext);
        self.report.numbered += 1;
    }

    fn relative_numeral(&self, doc: &Document, numeral: u32) -> String {
        match doc.chapter_prefix() {
            Some(chapter) => format!("{chapter}.{numeral}"),
            None if doc.number_within == NumberWithin::Section && self.section > 0 => {
                format!("{}.{numeral}", self.section)
            }
            None => numeral.to_string(),
        }
    }

    fn set_list_info(&mut self, doc: &mut Document, id: BlockId, depth: usize, flat: bool) {
        doc.block_mut(id).list = Some(ListInfo {
            depth,
            flat,
            item_count: None,
        });
    }

    fn ordered_list(&mut self, doc: &mut Document, id: BlockId, walker: &TreeWalker) {
        let depth = self.list_depth;
        let offset = self.list_offset(doc, id);
        let block = doc.block(id);
        let format = marks::formatter(depth, block.style.as_deref(), block.format_spec());
        if let Some(spec) = block.format_spec()
            && MarkFormat::parse(spec, depth).is_none()
        {
            log::warn!("ignoring list format {spec:?} on {:?}", block.id);
        }

        if depth == 0 && block.has_style(styles::PSEUDOCODE) {
            self.flat = Some(FlatList {
                list: id,
                format: format.clone(),
                next_index: offset,
            });
        }
        let flat = self.flat.is_some();
        self.set_list_info(doc, id, depth, flat);
        if flat {
            return;
        }

        let parent_reftext = if depth > 0 {
            walker
                .ancestor(|a| doc.block(a).kind == BlockKind::ListItem)
                .and_then(|a| doc.block(a).reftext.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };

        let items = list_items(doc, id);
        for (idx, item) in items.iter().enumerate() {
            let mark = format.render(idx + offset);
            let reftext = format!("{parent_reftext}{}", format.reference_mark(&mark));
            doc.block_mut(*item).mark = Some(mark);
            register_reftext(doc, *item, reftext);
        }
        if let Some(info) = doc.block_mut(id).list.as_mut() {
            info.item_count = Some(offset + items.len());
        }
    }

    /// Zero-based index of the first item: the end of the continued list,
    /// else the list's own start.
    fn list_offset(&self, doc: &Document, id: BlockId) -> usize {
        let block = doc.block(id);
        let Some(target) = block.continue_from() else {
            return block.start_offset();
        };
        self.continuation(doc, target).unwrap_or_else(|| {
            log::warn!(
                "list {:?} continues from {target:?}, which is not a finished ordered list; starting from 1",
                block.id
            );
            0
        })
    }

    fn continuation(&self, doc: &Document, target: &str) -> Option<usize> {
        if target.contains('#') && !target.starts_with('#') {
            let cref = CrossRef::parse(target);
            return self.book?.list_end(cref.document(), cref.anchor());
        }
        let anchor = target.trim_start_matches('#');
        let list = doc.block(doc.find_anchor(anchor)?);
        if list.kind != BlockKind::OrderedList {
            return None;
        }
        list.list?.item_count
    }

    fn flat_item(&mut self, doc: &mut Document, id: BlockId) {
        let Some(flat) = self.flat.as_mut() else {
            return;
        };
        let mark = flat.format.render(flat.next_index);
        let reftext = flat.format.reference_mark(&mark);
        flat.next_index += 1;
        doc.block_mut(id).mark = Some(mark);
        register_reftext(doc, id, reftext);
    }

    fn unordered_list(&mut self, doc: &mut Document, id: BlockId) {
        self.set_list_info(doc, id, self.list_depth, false);
        let glyph = MarkFormat::bullet(self.list_depth).render(0);
        for item in list_items(doc, id) {
            doc.block_mut(item).mark = Some(glyph.clone());
        }
    }

    /// Callouts sit outside the ordered-list nesting and always record depth 0.
    fn callout_list(&mut self, doc: &mut Document, id: BlockId) {
        self.set_list_info(doc, id, 0, false);
        let format = MarkFormat::callout();
        let items = list_items(doc, id);
        for (idx, item) in items.iter().enumerate() {
            let mark = format.render(idx);
            doc.block_mut(*item).mark = Some(mark.clone());
            register_reftext(doc, *item, mark);
        }
        if let Some(info) = doc.block_mut(id).list.as_mut() {
            info.item_count = Some(items.len());
        }
    }
}

fn list_items(doc: &Document, list: BlockId) -> Vec<BlockId> {
    doc.children(list)
        .iter()
        .copied()
        .filter(|c| doc.block(*c).kind == BlockKind::ListItem)
        .collect()
}

/// Sets the item's reftext and hands it to an unlabelled anchor that opens the item's text.
fn register_reftext(doc: &mut Document, item: BlockId, reftext: String) {
    let anchor = doc
        .block(item)
        .text
        .as_deref()
        .and_then(leading_anchor)
        .map(str::to_string);
    if let Some(anchor) = anchor {
        doc.backfill_anchor(&anchor, &reftext);
    }
    doc.block_mut(item).reftext = Some(reftext);
}

fn leading_anchor(text: &str) -> Option<&str> {
    static ANCHOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = ANCHOR_REGEX
        .get_or_init(|| Regex::new(r#"^<a id="(?P<anchor_id>.+?)""#).expect("Invalid anchor regex"));
    regex
        .captures(text)
        .and_then(|c| c.name("anchor_id"))
        .map(|m| m.as_str())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
