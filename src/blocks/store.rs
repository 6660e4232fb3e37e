use std::rc::Rc;

use super::{Block, BlockError, Field};

/// Seam between the drag engine and whatever owns the sequence.
pub trait Reorder {
    /// Move the block at `from` so that it ends up at `to`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if either index is invalid.
    fn move_block(&mut self, from: usize, to: usize) -> Result<(), BlockError>;
}

/// The ordered block sequence for one editing session.
///
/// The sequence is held behind a shared immutable handle. Every mutation
/// builds a new sequence and swaps the handle, so a reader holding an old
/// [`snapshot`](Self::snapshot) keeps seeing a complete, unchanged sequence
/// and a renderer can detect changes with [`is_same_sequence`](Self::is_same_sequence).
#[derive(Debug, Clone)]
pub struct BlockStore {
    blocks: Rc<[Block]>,
    revision: u64,
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore {
    /// A new session: one default block.
    pub fn new() -> Self {
        Self::from_blocks(vec![Block::default()])
    }

    /// Start from an explicit sequence.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: blocks.into(),
            revision: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Number of sequence replacements so far.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The current sequence. Cheap; shares the handle.
    pub fn snapshot(&self) -> Rc<[Block]> {
        Rc::clone(&self.blocks)
    }

    /// Whether `other` is still the live sequence (no mutation since it was taken).
    pub fn is_same_sequence(&self, other: &Rc<[Block]>) -> bool {
        Rc::ptr_eq(&self.blocks, other)
    }

    /// Append a default block.
    pub fn add_block(&mut self) {
        let mut next = self.blocks.to_vec();
        next.push(Block::default());
        self.replace(next);
        tracing::debug!(len = self.len(), "block added");
    }

    /// Remove the block at `index`; later blocks shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= len`.
    pub fn delete_block(&mut self, index: usize) -> Result<Block, BlockError> {
        self.check_index(index)?;
        let mut next = self.blocks.to_vec();
        let removed = next.remove(index);
        self.replace(next);
        tracing::debug!(index, len = self.len(), "block deleted");
        Ok(removed)
    }

    /// Set one field of the block at `index`. The value is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= len`.
    pub fn update_field(
        &mut self,
        index: usize,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), BlockError> {
        self.check_index(index)?;
        let value = value.into();
        let mut next = self.blocks.to_vec();
        let block = &mut next[index];
        match field {
            Field::Voice => block.voice = value,
            Field::Text => block.text = value,
            Field::Color => block.color = value,
        }
        self.replace(next);
        tracing::trace!(index, %field, "block field updated");
        Ok(())
    }

    /// [`update_field`](Self::update_field) with the field given by name.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::UnknownField`] for a name other than
    /// `voice`, `text` or `color`, or [`BlockError::IndexOutOfRange`].
    pub fn update_field_named(
        &mut self,
        index: usize,
        field_name: &str,
        value: impl Into<String>,
    ) -> Result<(), BlockError> {
        let field = field_name.parse()?;
        self.update_field(index, field, value)
    }

    /// Take the block out at `from` and insert it at `to`, where `to` counts
    /// positions in the sequence with the block already removed.
    ///
    /// `[a,b,c,d]` with `move_block(0, 2)` gives `[b,c,a,d]`. Moving a block
    /// onto itself leaves the sequence (and its handle) untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if either index is `>= len`.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), BlockError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let mut next = self.blocks.to_vec();
        let block = next.remove(from);
        next.insert(to, block);
        self.replace(next);
        tracing::debug!(from, to, "block moved");
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), BlockError> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(BlockError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }

    fn replace(&mut self, next: Vec<Block>) {
        self.blocks = next.into();
        self.revision += 1;
    }
}

impl Reorder for BlockStore {
    fn move_block(&mut self, from: usize, to: usize) -> Result<(), BlockError> {
        Self::move_block(self, from, to)
    }
}
