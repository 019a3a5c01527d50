use crate::models::{Block, BlockKind};

/// One counter per numbered block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Counter {
    Theorem,
    Table,
    Figure,
    Equation,
    Listing,
}

impl Counter {
    pub const ALL: [Counter; 5] = [
        Counter::Theorem,
        Counter::Table,
        Counter::Figure,
        Counter::Equation,
        Counter::Listing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Counter::Theorem => "thm-number",
            Counter::Table => "tbl-number",
            Counter::Figure => "fig-number",
            Counter::Equation => "eqn-number",
            Counter::Listing => "ltg-number",
        }
    }

    /// Counter a numbered block draws from, `None` for kinds that are never numbered.
    pub fn for_block(block: &Block) -> Option<Counter> {
        match block.kind {
            BlockKind::Example => Some(Counter::Theorem),
            BlockKind::Table => Some(Counter::Table),
            BlockKind::Image | BlockKind::OrderedList => Some(Counter::Figure),
            BlockKind::Equation => Some(Counter::Equation),
            BlockKind::Listing => Some(Counter::Listing),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// The counters of one document.
///
/// A fresh registry is created for every document walk; `reset` is the
/// resolver's business (top-level sections under within-section numbering).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingRegistry {
    counters: [u32; Counter::ALL.len()],
}

impl NumberingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next numeral of `counter`, starting at 1.
    pub fn assign(&mut self, counter: Counter) -> u32 {
        let slot = &mut self.counters[counter.slot()];
        *slot += 1;
        *slot
    }

    /// Last numeral handed out by `counter` (0 if none).
    pub fn current(&self, counter: Counter) -> u32 {
        self.counters[counter.slot()]
    }

    pub fn reset(&mut self) {
        self.counters = [0; Counter::ALL.len()];
    }
}
