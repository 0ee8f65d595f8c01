//! Bounded linear undo/redo history over full plan snapshots.
//!
//! Each entry is the object collection as it was *before* one mutation.
//! `position` counts the undoable entries: `entries[..position]` can be
//! undone, and when `position < len`, `entries[position]` equals the active
//! collection. The collection that follows the newest entry is not an entry
//! of its own; the first undo from the tip keeps it in `tip` so a later
//! redo can return to it.

use std::collections::VecDeque;

use shared::{PlacedObject, PlanSnapshot};

use crate::error::HistoryError;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct EditorHistory {
    entries: VecDeque<PlanSnapshot>,
    position: usize,
    tip: Option<PlanSnapshot>,
    capacity: usize,
}

impl Default for EditorHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl EditorHistory {
    /// Empty history keeping at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            position: 0,
            tip: None,
            capacity,
        }
    }

    /// Record the collection as it was before a mutation.
    ///
    /// Drops the redo branch, then evicts the oldest entries beyond capacity.
    pub fn record(&mut self, snapshot: PlanSnapshot) {
        self.entries.truncate(self.position);
        self.tip = None;
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.position = self.entries.len();
    }

    /// Step back one entry and return the collection to activate.
    ///
    /// `current` is the active collection; it is kept only when undoing from
    /// the tip, where it is not stored anywhere else.
    pub fn undo(&mut self, current: &[PlacedObject]) -> Result<PlanSnapshot, HistoryError> {
        if self.position == 0 {
            return Err(HistoryError::NothingToUndo);
        }
        if self.position == self.entries.len() {
            self.tip = Some(current.to_vec());
        }
        self.position -= 1;
        Ok(self.entries[self.position].clone())
    }

    /// Step forward one entry and return the collection to activate.
    pub fn redo(&mut self) -> Result<PlanSnapshot, HistoryError> {
        if self.position >= self.entries.len() {
            return Err(HistoryError::NothingToRedo);
        }
        let target = match self.entries.get(self.position + 1) {
            Some(snapshot) => snapshot.clone(),
            None => self.tip.clone().ok_or(HistoryError::NothingToRedo)?,
        };
        self.position += 1;
        Ok(target)
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Index of the last undoable entry, `None` when nothing can be undone.
    pub fn cursor(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Number of stored entries, never more than the capacity.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
        self.tip = None;
    }
}
