use crate::app::Model;
use crate::app::model::{TextEdit, ToastLevel};
use crate::blocks::{Field, cycle_choice};
use crate::drag::HoverOutcome;
use crate::editor::{Direction, TextField};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Blocks
    /// Append a default block
    AddBlock,
    /// Remove the block at index
    DeleteBlock(usize),
    /// Set a field of a block to a value
    SetField(usize, Field, String),
    /// Step a choice field through its options
    CycleOption {
        index: usize,
        field: Field,
        delta: isize,
    },
    /// Move a block from one index to another
    MoveBlock { from: usize, to: usize },

    // Selection
    /// Select block by index
    SelectBlock(usize),
    /// Select the next block
    SelectNext,
    /// Select the previous block
    SelectPrev,
    /// Focus a field of the selected block
    FocusField(Field),
    /// Focus the next field of the selected block
    FocusNextField,
    /// Focus the previous field of the selected block
    FocusPrevField,

    // Drag and drop
    /// Pick up a block (mouse down on its grip)
    StartDrag(usize),
    /// Pointer moved over a block while dragging
    DragHover { index: usize, row: u16 },
    /// Pointer released
    EndDrag,
    /// Pointer left the block list
    CancelDrag,

    // Text field
    /// Open the text field of a block
    EditText(usize),
    /// Close the text field
    ExitTextEdit,
    /// Insert a character at the cursor
    TextInsert(char),
    /// Insert a line break at the cursor
    TextNewline,
    /// Delete character before cursor (Backspace)
    TextDeleteBack,
    /// Delete character at cursor (Delete)
    TextDeleteForward,
    /// Move cursor in a direction
    TextMove(Direction),
    /// Move cursor to beginning of line (Home)
    TextHome,
    /// Move cursor to end of line (End)
    TextEnd,

    // Overlays
    /// Open the block structure dump
    ShowStructure,
    /// Close the block structure dump
    HideStructure,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Scroll the block list up by n blocks
    ScrollUp(usize),
    /// Scroll the block list down by n blocks
    ScrollDown(usize),
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Store errors are reported on the model, never raised.
pub fn update(mut model: Model, msg: Message) -> Model {
    let revision = model.store.revision();
    let offset = model.scroll_offset;
    let mut follow_selection = false;

    match msg {
        // Blocks
        Message::AddBlock => {
            model.store.add_block();
            model.selected = model.store.len() - 1;
            follow_selection = true;
        }
        Message::DeleteBlock(index) => match model.store.delete_block(index) {
            Ok(_) => {
                // positions shift; anything holding an index is stale
                model.drag.cancel();
                if model.editing_index().is_some() {
                    model.text_edit = None;
                }
                if model.selected > index {
                    model.selected -= 1;
                }
                model.clamp_selection();
                model.clamp_scroll();
            }
            Err(err) => model.report_error("Remove block", &err),
        },
        Message::SetField(index, field, value) => {
            if let Err(err) = model.store.update_field(index, field, value) {
                model.report_error("Update block", &err);
            }
        }
        Message::CycleOption {
            index,
            field,
            delta,
        } => {
            if let (Some(choices), Some(block)) = (field.choices(), model.store.get(index)) {
                let next = cycle_choice(choices, block.field(field), delta);
                if let Err(err) = model.store.update_field(index, field, next) {
                    model.report_error("Update block", &err);
                }
            }
            model.selected = index.min(model.store.len().saturating_sub(1));
            model.focus = field;
        }
        Message::MoveBlock { from, to } => match model.store.move_block(from, to) {
            Ok(()) => {
                follow_selection = model.selected == from;
                model.selected = position_after_move(model.selected, from, to);
                if let Some(edit) = model.text_edit.as_mut() {
                    edit.index = position_after_move(edit.index, from, to);
                }
            }
            Err(err) => model.report_error("Move block", &err),
        },

        // Selection
        Message::SelectBlock(index) => {
            if index < model.store.len() {
                model.selected = index;
                follow_selection = true;
            }
        }
        Message::SelectNext => {
            if model.selected + 1 < model.store.len() {
                model.selected += 1;
                follow_selection = true;
            }
        }
        Message::SelectPrev => {
            model.selected = model.selected.saturating_sub(1);
            follow_selection = true;
        }
        Message::FocusField(field) => model.focus = field,
        Message::FocusNextField => model.focus = next_field(model.focus, 1),
        Message::FocusPrevField => model.focus = next_field(model.focus, -1),

        // Drag and drop
        Message::StartDrag(index) => {
            if index < model.store.len() {
                model.text_edit = None;
                model.selected = index;
                let source = model.slot(index);
                model.drag.begin(&source);
            }
        }
        Message::DragHover { index, row } => {
            let target = model.slot(index);
            match model
                .drag
                .hover(&target, Some(f32::from(row)), &mut model.store)
            {
                Ok(HoverOutcome::Moved { to, .. }) => model.selected = to,
                Ok(_) => {}
                Err(err) => {
                    model.drag.cancel();
                    model.report_error("Drag block", &err);
                }
            }
        }
        Message::EndDrag => model.drag.drop_gesture(),
        Message::CancelDrag => model.drag.cancel(),

        // Text field
        Message::EditText(index) => {
            if let Some(block) = model.store.get(index) {
                model.text_edit = Some(TextEdit {
                    index,
                    field: TextField::from_text(&block.text),
                });
                model.selected = index;
                model.focus = Field::Text;
                follow_selection = true;
            }
        }
        Message::ExitTextEdit => model.text_edit = None,
        Message::TextInsert(ch) => edit_text(&mut model, |field| field.insert_char(ch)),
        Message::TextNewline => edit_text(&mut model, TextField::insert_newline),
        Message::TextDeleteBack => edit_text(&mut model, TextField::delete_back),
        Message::TextDeleteForward => edit_text(&mut model, TextField::delete_forward),
        Message::TextMove(direction) => edit_text(&mut model, |field| {
            field.move_cursor(direction);
            false
        }),
        Message::TextHome => edit_text(&mut model, |field| {
            field.move_home();
            false
        }),
        Message::TextEnd => edit_text(&mut model, |field| {
            field.move_end();
            false
        }),

        // Overlays
        Message::ShowStructure => match serde_json::to_string_pretty(&*model.store.snapshot()) {
            Ok(dump) => model.structure_dump = Some(dump),
            Err(err) => {
                model.show_toast(ToastLevel::Error, format!("Structure dump failed: {err}"));
            }
        },
        Message::HideStructure => model.structure_dump = None,
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            model.scroll_offset = model.scroll_offset.saturating_add(n);
            model.clamp_scroll();
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.clamp_scroll();
            model.reflow_layout();
        }
        Message::Redraw => {}

        Message::Quit => {
            model.drag.cancel();
            model.should_quit = true;
        }
    }

    // The open text field only ever edits the selected block.
    if model.editing_index().is_some_and(|i| i != model.selected) {
        model.text_edit = None;
    }
    if follow_selection {
        model.ensure_selected_visible();
    }
    if model.store.revision() != revision || model.scroll_offset != offset {
        model.reflow_layout();
    }
    model
}

/// Apply `edit` to the open text field and push the text into the store
/// when it changed.
fn edit_text(model: &mut Model, edit: impl FnOnce(&mut TextField) -> bool) {
    let Some(text_edit) = model.text_edit.as_mut() else {
        return;
    };
    if !edit(&mut text_edit.field) {
        return;
    }
    let index = text_edit.index;
    let text = text_edit.field.text();
    if let Err(err) = model.store.update_field(index, Field::Text, text) {
        model.text_edit = None;
        model.report_error("Edit text", &err);
    }
}

/// Where the block at `pos` ends up after `move_block(from, to)`.
const fn position_after_move(pos: usize, from: usize, to: usize) -> usize {
    if pos == from {
        to
    } else if from < pos && pos <= to {
        pos - 1
    } else if to <= pos && pos < from {
        pos + 1
    } else {
        pos
    }
}

const FIELD_ORDER: [Field; 3] = [Field::Voice, Field::Color, Field::Text];

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn next_field(current: Field, delta: isize) -> Field {
    let pos = FIELD_ORDER.iter().position(|f| *f == current).unwrap_or(0);
    let len = FIELD_ORDER.len() as isize;
    FIELD_ORDER[(pos as isize + delta).rem_euclid(len) as usize]
}
