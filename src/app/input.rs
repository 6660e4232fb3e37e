use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::blocks::Field;
use crate::editor::Direction;
use crate::ui::layout::Hit;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) if model.mouse_enabled => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if model.structure_dump.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 's') => {
                    Some(Message::HideStructure)
                }
                _ => None,
            };
        }
        if model.is_editing_text() {
            return Self::handle_text_key(key);
        }

        let selected = model.selected;
        let len = model.store.len();
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Char('s') => Some(Message::ShowStructure),
            KeyCode::Char('a') => Some(Message::AddBlock),
            KeyCode::Char('x') | KeyCode::Delete if selected < len => {
                Some(Message::DeleteBlock(selected))
            }

            // Reorder
            KeyCode::Char('J') if selected + 1 < len => Some(Message::MoveBlock {
                from: selected,
                to: selected + 1,
            }),
            KeyCode::Down if alt && selected + 1 < len => Some(Message::MoveBlock {
                from: selected,
                to: selected + 1,
            }),
            KeyCode::Char('K') if selected > 0 && selected < len => Some(Message::MoveBlock {
                from: selected,
                to: selected - 1,
            }),
            KeyCode::Up if alt && selected > 0 && selected < len => Some(Message::MoveBlock {
                from: selected,
                to: selected - 1,
            }),

            // Selection
            KeyCode::Char('j') | KeyCode::Down => Some(Message::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::SelectPrev),
            KeyCode::Tab => Some(Message::FocusNextField),
            KeyCode::BackTab => Some(Message::FocusPrevField),
            KeyCode::PageDown => Some(Message::ScrollDown(1)),
            KeyCode::PageUp => Some(Message::ScrollUp(1)),

            // Field editing
            KeyCode::Char('h') | KeyCode::Left => cycle(model, -1),
            KeyCode::Char('l') | KeyCode::Right => cycle(model, 1),
            KeyCode::Enter | KeyCode::Char(' ') if selected < len => match model.focus {
                Field::Text => Some(Message::EditText(selected)),
                field => Some(Message::CycleOption {
                    index: selected,
                    field,
                    delta: 1,
                }),
            },
            KeyCode::Char('e') if selected < len => Some(Message::EditText(selected)),
            _ => None,
        }
    }

    fn handle_text_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::ExitTextEdit),
            KeyCode::Enter => Some(Message::TextNewline),
            KeyCode::Backspace => Some(Message::TextDeleteBack),
            KeyCode::Delete => Some(Message::TextDeleteForward),
            KeyCode::Left => Some(Message::TextMove(Direction::Left)),
            KeyCode::Right => Some(Message::TextMove(Direction::Right)),
            KeyCode::Up => Some(Message::TextMove(Direction::Up)),
            KeyCode::Down => Some(Message::TextMove(Direction::Down)),
            KeyCode::Home => Some(Message::TextHome),
            KeyCode::End => Some(Message::TextEnd),
            KeyCode::Tab => Some(Message::TextInsert('\t')),
            KeyCode::Char(ch) => Some(Message::TextInsert(ch)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
                .then_some(Message::HideHelp);
        }
        if model.structure_dump.is_some() {
            return matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
                .then_some(Message::HideStructure);
        }

        let layout = &model.layout;

        if model.drag.is_dragging() {
            return match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    if !layout.in_list(mouse.column, mouse.row) {
                        return Some(Message::CancelDrag);
                    }
                    layout
                        .slot_at_row(mouse.row)
                        .map(|index| Message::DragHover {
                            index,
                            row: mouse.row,
                        })
                }
                MouseEventKind::Up(_) => Some(Message::EndDrag),
                _ => None,
            };
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match layout.hit_test(mouse.column, mouse.row)? {
                Hit::Grip(index) => Some(Message::StartDrag(index)),
                Hit::Body(index) => Some(Message::SelectBlock(index)),
                _ => None,
            },
            MouseEventKind::Up(MouseButton::Left) => match layout.hit_test(mouse.column, mouse.row)? {
                Hit::AddButton => Some(Message::AddBlock),
                Hit::StructureButton => Some(Message::ShowStructure),
                Hit::Remove(index) => Some(Message::DeleteBlock(index)),
                Hit::Voice(index) => Some(Message::CycleOption {
                    index,
                    field: Field::Voice,
                    delta: 1,
                }),
                Hit::Color(index) => Some(Message::CycleOption {
                    index,
                    field: Field::Color,
                    delta: 1,
                }),
                Hit::Text(index) => Some(Message::EditText(index)),
                Hit::Grip(_) | Hit::Body(_) => None,
            },
            MouseEventKind::Up(MouseButton::Right) => match layout.hit_test(mouse.column, mouse.row)? {
                Hit::Voice(index) => Some(Message::CycleOption {
                    index,
                    field: Field::Voice,
                    delta: -1,
                }),
                Hit::Color(index) => Some(Message::CycleOption {
                    index,
                    field: Field::Color,
                    delta: -1,
                }),
                _ => None,
            },
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(1)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(1)),
            _ => None,
        }
    }
}

fn cycle(model: &Model, delta: isize) -> Option<Message> {
    if model.selected >= model.store.len() || model.focus.choices().is_none() {
        return None;
    }
    Some(Message::CycleOption {
        index: model.selected,
        field: model.focus,
        delta,
    })
}
