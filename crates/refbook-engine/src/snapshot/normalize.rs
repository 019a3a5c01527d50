use serde::Serialize;

use crate::models::{BlockKind, Document};
use crate::walker::{Move, TreeWalker};

#[derive(Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_languages: Vec<String>,
}

#[derive(Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeral: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reftext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_depth: Option<usize>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub flat: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

/// Resolver output of every block that carries any, in document order.
pub fn normalize(doc: &Document) -> Snap {
    let mut blocks = Vec::new();
    let mut walker = TreeWalker::new(doc.root());
    let mut visiting = true;

    while let Some(id) = walker.current() {
        if visiting {
            let b = doc.block(id);
            let resolved = b.numeral.is_some()
                || b.reftext.is_some()
                || b.mark.is_some()
                || b.list.is_some();
            if resolved || (b.id.is_some() && b.kind != BlockKind::Other) {
                blocks.push(BlockSnap {
                    kind: b.kind.as_str().to_string(),
                    depth: walker.depth(),
                    id: b.id.clone(),
                    numeral: b.numeral,
                    reftext: b.reftext.clone(),
                    mark: b.mark.clone(),
                    list_depth: b.list.map(|l| l.depth),
                    flat: b.list.is_some_and(|l| l.flat),
                    item_count: b.list.and_then(|l| l.item_count),
                });
            }
        }

        let mut mv = Move::Retreat;
        walker.advance(doc, |m| mv = m);
        visiting = mv == Move::Explore;
    }

    Snap {
        blocks,
        extra_languages: doc.extra_languages().iter().cloned().collect(),
    }
}
