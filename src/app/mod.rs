//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::STRUCTURE_TARGET;
pub use model::{Model, TextEdit, ToastLevel};
pub use update::{Message, update};

use crate::config::DEFAULT_TITLE;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    title: String,
    mouse_enabled: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new editor session with the default title and one block.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            mouse_enabled: true,
        }
    }

    /// Set the script title shown above the blocks.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enable or disable mouse capture (drag-and-drop needs it).
    #[must_use]
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}
