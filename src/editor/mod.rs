//! Multi-line text field used to edit a block's narration text.
//!
//! The field is a rope with a single char-indexed cursor. Every edit
//! returns whether the text changed so the caller can push the new value
//! into the block store.

mod field;

pub use field::{Direction, TextField};
