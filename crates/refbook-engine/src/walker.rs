//! Iterative pre-order traversal of a document's block tree.
//!
//! The walker keeps the path from the root to the current block on an
//! explicit stack, so ancestor lookups are O(depth) and blocks never need a
//! parent pointer. Each call to [`TreeWalker::advance`] makes exactly one move
//! and reports it as [`Move::Explore`] (descended into a child) or
//! [`Move::Retreat`] (finished a block and popped back to its parent).

use crate::models::{BlockId, Document};

/// Default bound on nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Explore,
    Retreat,
}

#[derive(Debug, Clone)]
pub struct TreeWalker {
    max_depth: usize,
    /// Index of the next unexplored child at each depth.
    next: Vec<usize>,
    path: Vec<BlockId>,
    truncated: usize,
}

impl TreeWalker {
    pub fn new(root: BlockId) -> Self {
        Self::with_max_depth(root, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(root: BlockId, max_depth: usize) -> Self {
        Self {
            max_depth,
            next: vec![0; max_depth + 1],
            path: vec![root],
            truncated: 0,
        }
    }

    /// The block at the walk position, `None` once the walk is exhausted.
    pub fn current(&self) -> Option<BlockId> {
        self.path.last().copied()
    }

    /// Root-to-current path, current block last.
    pub fn path(&self) -> &[BlockId] {
        &self.path
    }

    /// Parent of the current block.
    pub fn parent(&self) -> Option<BlockId> {
        self.path.len().checked_sub(2).map(|i| self.path[i])
    }

    /// Nearest strict ancestor of the current block matching `pred`.
    pub fn ancestor(&self, mut pred: impl FnMut(BlockId) -> bool) -> Option<BlockId> {
        let n = self.path.len().saturating_sub(1);
        self.path[..n].iter().rev().copied().find(|id| pred(*id))
    }

    /// Depth of the current block (root = 0).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of blocks whose children were skipped because of the depth bound.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Moves one step and reports the move.
    ///
    /// Descends into the next unvisited child of the current block if there is
    /// one and the depth bound allows it; otherwise retreats to the parent.
    /// Does nothing once the walk is exhausted.
    pub fn advance(&mut self, doc: &Document, on_move: impl FnOnce(Move)) {
        let Some(current) = self.current() else {
            return;
        };
        let level = self.depth();
        let children = doc.children(current);

        if level < self.max_depth && self.next[level + 1] < children.len() {
            self.path.push(children[self.next[level + 1]]);
            on_move(Move::Explore);
            return;
        }

        if level >= self.max_depth && !children.is_empty() {
            self.truncated += 1;
        }
        if level < self.max_depth {
            self.next[level + 1] = 0;
        }
        self.next[level] += 1;
        self.path.pop();
        on_move(Move::Retreat);
    }
}
