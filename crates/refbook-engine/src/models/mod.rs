pub mod block;
pub mod document;
pub mod source_file;

pub use block::{Block, BlockId, BlockKind, ListInfo};
pub use document::{Document, NumberWithin, RefMap, TreeError};
pub use source_file::{INDEX_KEY, SourceFile};
