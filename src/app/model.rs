use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::blocks::{BlockError, BlockStore, Field};
use crate::config::DEFAULT_TITLE;
use crate::drag::DragEngine;
use crate::editor::TextField;
use crate::ui::layout::{BlockSlot, ScreenLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Text field open on one block.
#[derive(Debug)]
pub struct TextEdit {
    pub index: usize,
    pub field: TextField,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The narration blocks being edited
    pub store: BlockStore,
    /// Drag gesture in progress, if any
    pub drag: DragEngine,
    /// Script title shown above the blocks
    pub title: String,
    /// Block the keyboard acts on
    pub selected: usize,
    /// Field of the selected block the keyboard acts on
    pub focus: Field,
    /// Open text field, while typing into a block
    pub text_edit: Option<TextEdit>,
    /// First block shown in the list
    pub scroll_offset: usize,
    /// Geometry from the last layout pass
    pub layout: ScreenLayout,
    /// Terminal size
    pub width: u16,
    pub height: u16,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Pretty-printed block structure, while its overlay is open
    pub structure_dump: Option<String>,
    /// Whether mouse input is captured
    pub mouse_enabled: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// A fresh session: one default block.
    pub fn new(title: impl Into<String>, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            store: BlockStore::new(),
            drag: DragEngine::new(),
            title: title.into(),
            selected: 0,
            focus: Field::Voice,
            text_edit: None,
            scroll_offset: 0,
            layout: ScreenLayout::default(),
            width: terminal_size.0,
            height: terminal_size.1,
            help_visible: false,
            structure_dump: None,
            mouse_enabled: true,
            toast: None,
            should_quit: false,
        };
        model.reflow_layout();
        model
    }

    /// Replace the block store, e.g. to seed a session.
    #[must_use]
    pub fn with_store(mut self, store: BlockStore) -> Self {
        self.store = store;
        self.clamp_selection();
        self.reflow_layout();
        self
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Recompute block geometry for the current size, sequence and scroll.
    pub fn reflow_layout(&mut self) {
        self.layout = ScreenLayout::compute(self.area(), self.store.len(), self.scroll_offset);
    }

    /// Drag/drop view of block `index` using the last layout.
    pub fn slot(&self, index: usize) -> BlockSlot {
        self.layout.block_slot(index)
    }

    pub const fn is_editing_text(&self) -> bool {
        self.text_edit.is_some()
    }

    /// Index being edited in a text field, if any.
    pub fn editing_index(&self) -> Option<usize> {
        self.text_edit.as_ref().map(|edit| edit.index)
    }

    pub(super) fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }

    /// Scroll so the selected block is fully on screen.
    pub(super) fn ensure_selected_visible(&mut self) {
        let capacity = ScreenLayout::compute(self.area(), self.store.len(), 0).visible_capacity();
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + capacity {
            self.scroll_offset = self.selected + 1 - capacity;
        }
        self.clamp_scroll();
    }

    pub(super) fn clamp_scroll(&mut self) {
        let capacity = ScreenLayout::compute(self.area(), self.store.len(), 0).visible_capacity();
        let max_offset = self.store.len().saturating_sub(capacity);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Log a rejected store operation and surface it to the user.
    pub(super) fn report_error(&mut self, action: &str, err: &BlockError) {
        // not warn: stderr is underneath the alternate screen
        tracing::debug!(action, error = %err, "block operation rejected");
        self.show_toast(ToastLevel::Error, format!("{action}: {err}"));
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, (80, 24))
    }
}
