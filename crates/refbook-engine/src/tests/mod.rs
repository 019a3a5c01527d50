use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::models::{Block, BlockId, BlockKind, Document};

/// Create a temporary source directory
pub fn create_test_srcdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(srcdir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = srcdir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Append `count` plain list items to `list`
pub fn push_items(doc: &mut Document, list: BlockId, count: usize) -> Vec<BlockId> {
    (0..count)
        .map(|_| doc.push(list, Block::new(BlockKind::ListItem)).unwrap())
        .collect()
}

/// Append `list` under `parent` with `count` items
pub fn push_ordered_list(
    doc: &mut Document,
    parent: BlockId,
    list: Block,
    count: usize,
) -> (BlockId, Vec<BlockId>) {
    let list = doc.push(parent, list).unwrap();
    let items = push_items(doc, list, count);
    (list, items)
}

pub fn item_marks(doc: &Document, items: &[BlockId]) -> Vec<String> {
    items
        .iter()
        .map(|i| doc.block(*i).mark.clone().unwrap_or_default())
        .collect()
}

pub fn item_reftexts(doc: &Document, items: &[BlockId]) -> Vec<String> {
    items
        .iter()
        .map(|i| doc.block(*i).reftext.clone().unwrap_or_default())
        .collect()
}
