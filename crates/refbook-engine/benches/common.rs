// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use refbook_engine::models::{Block, BlockId, BlockKind, Document};

/// A chapter with `sections` top-level sections, each holding numbered blocks
/// and an ordered list nested `depth` levels deep.
#[allow(dead_code)]
pub fn generate_chapter(sections: usize, depth: usize) -> Document {
    let mut doc = Document::empty().with_chapter("1");
    let root = doc.root();

    for section in 0..sections {
        let sec = doc
            .push(root, Block::section(1).with_id(format!("sec-{section}")))
            .unwrap();
        doc.push(sec, Block::new(BlockKind::Example).with_id(format!("thm-{section}")))
            .unwrap();
        doc.push(sec, Block::new(BlockKind::Table)).unwrap();
        doc.push(sec, Block::new(BlockKind::Equation).with_option("numbered"))
            .unwrap();
        generate_nested_list(&mut doc, sec, depth);
    }

    doc
}

#[allow(dead_code)]
fn generate_nested_list(doc: &mut Document, parent: BlockId, remaining_depth: usize) {
    if remaining_depth == 0 {
        return;
    }

    let list = doc.push(parent, Block::new(BlockKind::OrderedList)).unwrap();
    for _ in 0..3 {
        doc.push(list, Block::new(BlockKind::ListItem)).unwrap();
    }
    let last = doc.children(list)[2];
    generate_nested_list(doc, last, remaining_depth - 1);
}
