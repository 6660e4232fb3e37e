//! Drag-and-drop reordering over a vertically stacked list.
//!
//! A drag gesture is a stream of hover ticks. Each tick is checked against
//! the hovered slot's vertical midpoint and, once the pointer has crossed it
//! in the direction of travel, turned into a single [`Reorder::move_block`]
//! call. The engine keeps tracking the dragged block by its *current*
//! position, so after every accepted move the tracked index is the hovered
//! index.

use crate::blocks::{BlockError, Reorder};

/// Vertical extent of a drop target, in the same units as the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Half of the box's own height.
    ///
    /// This is relative to `top`, not an absolute coordinate; it is compared
    /// against the pointer offset from `top`.
    pub fn middle_offset(&self) -> f32 {
        (self.bottom - self.top) / 2.0
    }
}

/// Something that can be picked up; carries its current index.
pub trait Draggable {
    fn drag_index(&self) -> usize;
}

/// Something that receives hover ticks and can report its geometry.
pub trait DropTarget {
    fn drop_index(&self) -> usize;

    /// `None` when the target is not currently measured (e.g. off screen).
    fn bounds(&self) -> Option<Bounds>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        index: usize,
    },
}

/// What a single hover tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// No gesture in progress.
    Idle,
    /// Hovering the slot the dragged block already occupies.
    SameSlot,
    /// Target geometry or pointer position missing this tick.
    NoGeometry,
    /// Pointer has not crossed the midpoint in the direction of travel yet.
    Suppressed,
    /// The dragged block was moved.
    Moved { from: usize, to: usize },
}

impl HoverOutcome {
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    state: DragState,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> DragState {
        self.state
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Current position of the dragged block, if a gesture is active.
    pub const fn dragged_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { index } => Some(index),
            DragState::Idle => None,
        }
    }

    /// Pick up `source`. Restarts the gesture if one is already active.
    pub fn begin(&mut self, source: &impl Draggable) {
        let index = source.drag_index();
        tracing::debug!(index, "drag started");
        self.state = DragState::Dragging { index };
    }

    /// Process one hover tick over `target` with the pointer at `pointer_y`.
    ///
    /// # Errors
    ///
    /// Propagates a [`BlockError`] from the store; the tracked index is left
    /// as it was.
    pub fn hover(
        &mut self,
        target: &impl DropTarget,
        pointer_y: Option<f32>,
        store: &mut impl Reorder,
    ) -> Result<HoverOutcome, BlockError> {
        let DragState::Dragging { index: dragged } = self.state else {
            return Ok(HoverOutcome::Idle);
        };
        let hovered = target.drop_index();
        if dragged == hovered {
            return Ok(HoverOutcome::SameSlot);
        }
        let (Some(bounds), Some(pointer_y)) = (target.bounds(), pointer_y) else {
            return Ok(HoverOutcome::NoGeometry);
        };

        let hover_middle_y = bounds.middle_offset();
        let hover_client_y = pointer_y - bounds.top;

        if dragged < hovered && hover_client_y < hover_middle_y {
            return Ok(HoverOutcome::Suppressed);
        }
        if dragged > hovered && hover_client_y > hover_middle_y {
            return Ok(HoverOutcome::Suppressed);
        }

        store.move_block(dragged, hovered)?;
        self.state = DragState::Dragging { index: hovered };
        tracing::trace!(from = dragged, to = hovered, "drag reorder");
        Ok(HoverOutcome::Moved {
            from: dragged,
            to: hovered,
        })
    }

    /// End the gesture. Moves already made stay.
    pub fn drop_gesture(&mut self) {
        if let DragState::Dragging { index } = self.state {
            tracing::debug!(index, "drag dropped");
        }
        self.state = DragState::Idle;
    }

    /// Abandon the gesture. Same as dropping: nothing to roll back.
    pub fn cancel(&mut self) {
        if let DragState::Dragging { index } = self.state {
            tracing::debug!(index, "drag cancelled");
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Block, BlockStore};

    /// A list slot with fixed geometry.
    struct Slot {
        index: usize,
        bounds: Option<Bounds>,
    }

    impl Slot {
        fn at(index: usize, top: f32, bottom: f32) -> Self {
            Self {
                index,
                bounds: Some(Bounds::new(top, bottom)),
            }
        }
    }

    impl Draggable for Slot {
        fn drag_index(&self) -> usize {
            self.index
        }
    }

    impl DropTarget for Slot {
        fn drop_index(&self) -> usize {
            self.index
        }

        fn bounds(&self) -> Option<Bounds> {
            self.bounds
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        moves: Vec<(usize, usize)>,
    }

    impl Reorder for RecordingStore {
        fn move_block(&mut self, from: usize, to: usize) -> Result<(), BlockError> {
            self.moves.push((from, to));
            Ok(())
        }
    }

    fn dragging(index: usize) -> DragEngine {
        let mut engine = DragEngine::new();
        engine.begin(&Slot::at(index, 0.0, 10.0));
        engine
    }

    #[test]
    fn test_middle_offset_is_height_relative() {
        let bounds = Bounds::new(100.0, 140.0);
        assert!((bounds.middle_offset() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hover_while_idle_is_ignored() {
        let mut engine = DragEngine::new();
        let mut store = RecordingStore::default();
        let outcome = engine
            .hover(&Slot::at(1, 10.0, 20.0), Some(19.0), &mut store)
            .unwrap();
        assert_eq!(outcome, HoverOutcome::Idle);
        assert!(store.moves.is_empty());
    }

    #[test]
    fn test_downward_hover_before_midpoint_is_suppressed() {
        let mut engine = dragging(0);
        let mut store = RecordingStore::default();
        // slot 2 spans 20..30, midpoint offset 5; pointer offset 4
        let outcome = engine
            .hover(&Slot::at(2, 20.0, 30.0), Some(24.0), &mut store)
            .unwrap();
        assert_eq!(outcome, HoverOutcome::Suppressed);
        assert!(store.moves.is_empty());
        assert_eq!(engine.dragged_index(), Some(0));
    }

    #[test]
    fn test_downward_hover_at_midpoint_moves_once() {
        let mut engine = dragging(0);
        let mut store = RecordingStore::default();
        let outcome = engine
            .hover(&Slot::at(2, 20.0, 30.0), Some(25.0), &mut store)
            .unwrap();
        assert_eq!(outcome, HoverOutcome::Moved { from: 0, to: 2 });
        assert_eq!(store.moves, [(0, 2)]);
        assert_eq!(engine.dragged_index(), Some(2));
    }

    #[test]
    fn test_upward_hover_past_midpoint_is_suppressed() {
        let mut engine = dragging(3);
        let mut store = RecordingStore::default();
        let outcome = engine
            .hover(&Slot::at(1, 10.0, 20.0), Some(16.0), &mut store)
            .unwrap();
        assert_eq!(outcome, HoverOutcome::Suppressed);

        let outcome = engine
            .hover(&Slot::at(1, 10.0, 20.0), Some(15.0), &mut store)
            .unwrap();
        assert_eq!(outcome, HoverOutcome::Moved { from: 3, to: 1 });
        assert_eq!(engine.dragged_index(), Some(1));
    }

    #[test]
    fn test_hovering_own_slot_never_moves() {
        let mut engine = dragging(1);
        let mut store = RecordingStore::default();
        for _ in 0..2 {
            let outcome = engine
                .hover(&Slot::at(1, 10.0, 20.0), Some(19.0), &mut store)
                .unwrap();
            assert_eq!(outcome, HoverOutcome::SameSlot);
        }
        assert!(store.moves.is_empty());
    }

    #[test]
    fn test_missing_geometry_is_a_noop() {
        let mut engine = dragging(0);
        let mut store = RecordingStore::default();
        let unmeasured = Slot {
            index: 1,
            bounds: None,
        };
        assert_eq!(
            engine.hover(&unmeasured, Some(5.0), &mut store).unwrap(),
            HoverOutcome::NoGeometry
        );
        assert_eq!(
            engine
                .hover(&Slot::at(1, 10.0, 20.0), None, &mut store)
                .unwrap(),
            HoverOutcome::NoGeometry
        );
        assert!(store.moves.is_empty());
        assert!(engine.is_dragging());
    }

    #[test]
    fn test_repeat_tick_after_move_hits_same_slot() {
        let mut engine = dragging(0);
        let mut store = RecordingStore::default();
        let target = Slot::at(1, 10.0, 20.0);
        assert!(engine.hover(&target, Some(18.0), &mut store).unwrap().moved());
        assert_eq!(
            engine.hover(&target, Some(18.0), &mut store).unwrap(),
            HoverOutcome::SameSlot
        );
        assert_eq!(store.moves.len(), 1);
    }

    #[test]
    fn test_drop_and_cancel_return_to_idle() {
        let mut engine = dragging(2);
        engine.drop_gesture();
        assert_eq!(engine.state(), DragState::Idle);

        let mut engine = dragging(2);
        engine.cancel();
        assert_eq!(engine.dragged_index(), None);
    }

    #[test]
    fn test_store_error_keeps_tracked_index() {
        let mut engine = dragging(5);
        let mut store = BlockStore::new();
        let err = engine
            .hover(&Slot::at(0, 0.0, 10.0), Some(0.0), &mut store)
            .unwrap_err();
        assert_eq!(err, BlockError::IndexOutOfRange { index: 5, len: 1 });
        assert_eq!(engine.dragged_index(), Some(5));
    }

    #[test]
    fn test_gesture_walks_block_down_the_store() {
        let tags = ["a", "b", "c", "d"];
        let mut store = BlockStore::from_blocks(
            tags.iter()
                .map(|t| Block {
                    text: (*t).to_string(),
                    ..Block::default()
                })
                .collect(),
        );
        let mut engine = dragging(0);
        // slots are 4 rows tall, stacked from row 0
        for (index, pointer) in [(1, 6.0), (2, 10.0), (3, 14.0)] {
            let top = index as f32 * 4.0;
            let slot = Slot::at(index, top, top + 4.0);
            assert!(engine.hover(&slot, Some(pointer), &mut store).unwrap().moved());
        }
        engine.drop_gesture();

        let order: Vec<_> = store.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(order, ["b", "c", "d", "a"]);
    }
}
