//! Screen geometry for the block list.
//!
//! Layout is a pure function of the terminal size, the number of blocks and
//! the scroll offset. The render pass stores the result on the model so input
//! handling and drag hover ticks see the same geometry the user sees.

use ratatui::layout::{Position, Rect};

use crate::drag::{Bounds, Draggable, DropTarget};

/// Rows taken by one block editor, borders included.
pub const BLOCK_HEIGHT: u16 = 5;
/// Rows of narration text visible inside a block.
pub const TEXT_ROWS: u16 = 2;

pub const GRIP_WIDTH: u16 = 2;
pub const VOICE_WIDTH: u16 = 20;
pub const COLOR_WIDTH: u16 = 12;

pub const REMOVE_LABEL: &str = "[Remover Bloco]";
pub const ADD_LABEL: &str = "[+ Adicionar Bloco]";
pub const STRUCTURE_LABEL: &str = "[Mostrar Estrutura dos Blocos]";

/// Geometry of one visible block editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub index: usize,
    pub area: Rect,
    pub grip: Rect,
    pub voice: Rect,
    pub color: Rect,
    pub remove: Rect,
    pub text: Rect,
}

impl SlotLayout {
    fn new(index: usize, area: Rect) -> Self {
        let inner = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let row = |x: u16, width: u16| Rect::new(x, inner.y, width, 1).intersection(inner);
        let grip = row(inner.x, GRIP_WIDTH);
        let voice = row(inner.x + GRIP_WIDTH, VOICE_WIDTH);
        let color = row(inner.x + GRIP_WIDTH + VOICE_WIDTH + 1, COLOR_WIDTH);
        let remove_width = label_width(REMOVE_LABEL);
        let remove = row(
            inner.right().saturating_sub(remove_width).max(inner.x),
            remove_width,
        );
        let text = Rect::new(inner.x, inner.y + 1, inner.width, TEXT_ROWS).intersection(inner);
        Self {
            index,
            area,
            grip,
            voice,
            color,
            remove,
            text,
        }
    }
}

/// What lies under a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Drag handle: the grip marker or the block's top border.
    Grip(usize),
    Voice(usize),
    Color(usize),
    Remove(usize),
    Text(usize),
    /// Anywhere else inside the block.
    Body(usize),
    AddButton,
    StructureButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub title: Rect,
    pub list: Rect,
    pub buttons: Rect,
    pub status: Rect,
    pub add_button: Rect,
    pub structure_button: Rect,
    /// Fully visible block editors, in sequence order.
    pub slots: Vec<SlotLayout>,
}

impl ScreenLayout {
    /// Lay out `block_count` blocks starting at block `scroll_offset`.
    pub fn compute(area: Rect, block_count: usize, scroll_offset: usize) -> Self {
        let title = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let status = Rect::new(
            area.x,
            area.bottom().saturating_sub(1).max(area.y),
            area.width,
            u16::from(area.height >= 2),
        );
        let buttons = Rect::new(
            area.x,
            area.bottom().saturating_sub(2).max(area.y),
            area.width,
            u16::from(area.height >= 3),
        );
        let list = Rect::new(
            area.x,
            area.y + title.height,
            area.width,
            area.height.saturating_sub(3),
        );

        let add_button =
            Rect::new(buttons.x + 1, buttons.y, label_width(ADD_LABEL), buttons.height)
                .intersection(buttons);
        let structure_button = Rect::new(
            add_button.right() + 2,
            buttons.y,
            label_width(STRUCTURE_LABEL),
            buttons.height,
        )
        .intersection(buttons);

        let mut slots = Vec::new();
        let mut y = list.y;
        for index in scroll_offset..block_count {
            if y + BLOCK_HEIGHT > list.bottom() {
                break;
            }
            slots.push(SlotLayout::new(
                index,
                Rect::new(list.x, y, list.width, BLOCK_HEIGHT),
            ));
            y += BLOCK_HEIGHT;
        }

        Self {
            title,
            list,
            buttons,
            status,
            add_button,
            structure_button,
            slots,
        }
    }

    /// How many block editors fit in the list area.
    pub fn visible_capacity(&self) -> usize {
        usize::from((self.list.height / BLOCK_HEIGHT).max(1))
    }

    pub fn slot(&self, index: usize) -> Option<&SlotLayout> {
        self.slots.iter().find(|slot| slot.index == index)
    }

    /// Drag/drop view of block `index`; unmeasured if it is not on screen.
    pub fn block_slot(&self, index: usize) -> BlockSlot {
        BlockSlot {
            index,
            area: self.slot(index).map(|slot| slot.area),
        }
    }

    /// Block whose editor covers `row`, ignoring the column.
    pub fn slot_at_row(&self, row: u16) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| row >= slot.area.y && row < slot.area.bottom())
            .map(|slot| slot.index)
    }

    pub fn in_list(&self, column: u16, row: u16) -> bool {
        self.list.contains(Position::new(column, row))
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        if self.add_button.contains(pos) {
            return Some(Hit::AddButton);
        }
        if self.structure_button.contains(pos) {
            return Some(Hit::StructureButton);
        }
        let slot = self.slots.iter().find(|slot| slot.area.contains(pos))?;
        let i = slot.index;
        let hit = if row == slot.area.y || slot.grip.contains(pos) {
            Hit::Grip(i)
        } else if slot.remove.contains(pos) {
            Hit::Remove(i)
        } else if slot.voice.contains(pos) {
            Hit::Voice(i)
        } else if slot.color.contains(pos) {
            Hit::Color(i)
        } else if slot.text.contains(pos) {
            Hit::Text(i)
        } else {
            Hit::Body(i)
        };
        Some(hit)
    }
}

/// A block editor as seen by the drag engine: both a drag source and a
/// drop target, measured by its on-screen rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSlot {
    pub index: usize,
    pub area: Option<Rect>,
}

impl Draggable for BlockSlot {
    fn drag_index(&self) -> usize {
        self.index
    }
}

impl DropTarget for BlockSlot {
    fn drop_index(&self) -> usize {
        self.index
    }

    fn bounds(&self) -> Option<Bounds> {
        self.area
            .map(|area| Bounds::new(f32::from(area.top()), f32::from(area.bottom())))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn label_width(label: &str) -> u16 {
    unicode_width::UnicodeWidthStr::width(label) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(len: usize, offset: usize) -> ScreenLayout {
        ScreenLayout::compute(Rect::new(0, 0, 80, 24), len, offset)
    }

    #[test]
    fn test_chrome_rows() {
        let layout = layout(1, 0);
        assert_eq!(layout.title, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.list, Rect::new(0, 1, 80, 21));
        assert_eq!(layout.buttons.y, 22);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_slots_stack_and_stop_at_list_bottom() {
        let layout = layout(10, 0);
        // 21 list rows hold four 5-row blocks
        assert_eq!(layout.slots.len(), 4);
        assert_eq!(layout.visible_capacity(), 4);
        assert_eq!(layout.slots[0].area, Rect::new(0, 1, 80, 5));
        assert_eq!(layout.slots[3].area.y, 16);
    }

    #[test]
    fn test_scroll_offset_shifts_first_slot() {
        let layout = layout(10, 3);
        assert_eq!(layout.slots[0].index, 3);
        assert!(layout.slot(2).is_none());
        assert_eq!(layout.block_slot(2).bounds(), None);
    }

    #[test]
    fn test_block_slot_bounds_follow_rows() {
        let layout = layout(3, 0);
        let slot = layout.block_slot(1);
        assert_eq!(slot.drag_index(), 1);
        assert_eq!(slot.bounds(), Some(Bounds::new(6.0, 11.0)));
    }

    #[test]
    fn test_hit_test_regions() {
        let layout = layout(2, 0);
        // block 0 occupies rows 1..6; inner row is 2
        assert_eq!(layout.hit_test(10, 1), Some(Hit::Grip(0)));
        assert_eq!(layout.hit_test(1, 2), Some(Hit::Grip(0)));
        assert_eq!(layout.hit_test(5, 2), Some(Hit::Voice(0)));
        assert_eq!(layout.hit_test(25, 2), Some(Hit::Color(0)));
        assert_eq!(layout.hit_test(70, 2), Some(Hit::Remove(0)));
        assert_eq!(layout.hit_test(10, 3), Some(Hit::Text(0)));
        assert_eq!(layout.hit_test(50, 2), Some(Hit::Body(0)));
        assert_eq!(layout.hit_test(5, 7), Some(Hit::Voice(1)));
        assert_eq!(layout.hit_test(5, 8), Some(Hit::Text(1)));
        assert_eq!(layout.hit_test(2, 22), Some(Hit::AddButton));
        assert_eq!(layout.hit_test(30, 22), Some(Hit::StructureButton));
        assert_eq!(layout.hit_test(5, 15), None);
    }

    #[test]
    fn test_slot_at_row() {
        let layout = layout(2, 0);
        assert_eq!(layout.slot_at_row(1), Some(0));
        assert_eq!(layout.slot_at_row(6), Some(1));
        assert_eq!(layout.slot_at_row(11), None);
    }

    #[test]
    fn test_tiny_terminal_has_no_slots() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 20, 4), 3, 0);
        assert!(layout.slots.is_empty());
        assert_eq!(layout.visible_capacity(), 1);
    }
}
