use std::collections::HashMap;

use crate::models::{BlockKind, Document, NumberWithin};
use crate::numbering::Counter;
use crate::walker::{Move, TreeWalker};

/// Panics if a resolved document breaks a numbering or list invariant.
pub fn check(doc: &Document) {
    let mut expected: HashMap<Counter, u32> = HashMap::new();
    let mut walker = TreeWalker::new(doc.root());
    let mut visiting = true;

    while let Some(id) = walker.current() {
        if visiting {
            let block = doc.block(id);
            assert!(block.is_processed(), "unprocessed block {id:?}");

            if block.kind == BlockKind::Section
                && block.level == 1
                && doc.number_within == NumberWithin::Section
            {
                expected.clear();
            }

            if block.is_numbered() {
                let counter = Counter::for_block(block)
                    .unwrap_or_else(|| panic!("numbered block without counter: {id:?}"));
                let next = expected.entry(counter).or_insert(0);
                *next += 1;
                assert_eq!(
                    block.numeral,
                    Some(*next),
                    "{} out of sequence at {id:?}",
                    counter.name()
                );
                assert!(block.reftext.is_some(), "numbered block {id:?} has no reftext");
            } else {
                assert_eq!(block.numeral, None, "unnumbered block {id:?} has a numeral");
            }

            if let Some(info) = block.list {
                let expected_depth = if block.kind == BlockKind::CalloutList {
                    0
                } else {
                    walker
                        .path()
                        .iter()
                        .take(walker.depth())
                        .filter(|a| doc.block(**a).kind == BlockKind::OrderedList)
                        .count()
                };
                assert_eq!(info.depth, expected_depth, "list depth mismatch at {id:?}");
            }
        }

        let mut mv = Move::Retreat;
        walker.advance(doc, |m| mv = m);
        visiting = mv == Move::Explore;
    }
}
