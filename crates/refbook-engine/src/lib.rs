//! # refbook engine
//!
//! Numbering and cross-reference resolution for books made of several
//! documents. A parser hands over one block tree per document; the
//! [`ReferenceResolver`] walks it once and stamps numerals, reftexts and list
//! markers on the blocks, and a [`Book`] records each document's reference
//! map so later chapters can label `document#anchor` links.
//!
//! ## Modules
//!
//! - **`models`**: blocks, documents (block arenas with anchor catalogs), source files
//! - **`walker`**: iterative, depth-bounded pre-order traversal
//! - **`numbering`**: per-document counters
//! - **`marks`**: list marker formats
//! - **`resolver`**: the resolution pass
//! - **`book`**: the cross-document reference table and the book driver
//! - **`tree`** / **`io`**: JSON interchange of parsed trees
//! - **`snapshot`**: invariant checks and normalized output for snapshot tests

pub mod book;
pub mod highlight;
pub mod io;
pub mod marks;
pub mod models;
pub mod numbering;
pub mod resolver;
pub mod snapshot;
pub mod tree;
pub mod walker;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use book::{Book, BookSettings, CrossDocBook, CrossRef, ResolvedLink};
pub use io::*;
pub use models::*;
pub use resolver::{ReferenceResolver, ResolveReport};
pub use tree::{BlockTree, DocumentTree};
