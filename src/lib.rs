// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. blocks::BlockError)
    clippy::module_name_repetitions
)]

//! # Roteiro
//!
//! A terminal editor for narration scripts.
//!
//! A script is an ordered list of blocks. Each block carries a narrator
//! voice, the narrated text and a highlight color. Blocks can be added,
//! removed, edited in place and reordered by dragging them with the mouse.
//!
//! ## Architecture
//!
//! Roteiro uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`blocks`]: Block data and the ordered block store
//! - [`drag`]: Drag-and-drop reordering engine
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`editor`]: Multi-line text field for narration
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod blocks;
pub mod config;
pub mod drag;
pub mod editor;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::blocks::{Block, BlockError, BlockStore, Field, Reorder};
    pub use crate::drag::{DragEngine, DragState, HoverOutcome};
}
