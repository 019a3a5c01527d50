//! # Snapshot Testing Support
//!
//! Utilities for testing the resolver via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a resolved document to a stable, serializable `Snap`
//!   for `insta` snapshot testing
//! - **`invariants`**: Runtime checks for resolver correctness (numbered blocks carry
//!   numeral and reftext, numerals count up from 1 per counter scope, list depths
//!   match their ordered-list ancestry, callout lists at 0)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
