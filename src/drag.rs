//! Per-item drag-and-drop state for the presentation layer
//!
//! Tracks which item is being dragged and which one is the current drop
//! target, so views can derive their markers from here instead of toggling
//! shared class names.

use crate::nft::NftRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemUiState {
    pub dragging: bool,
    pub drop_target: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    from: Option<usize>,
    to: Option<usize>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `index`; bookmarked records are pinned and cannot be dragged
    pub fn start(&mut self, index: usize, list: &[NftRecord]) -> bool {
        match list.get(index) {
            Some(item) if !item.is_bookmarked() => {
                self.from = Some(index);
                self.to = None;
                true
            }
            _ => false,
        }
    }

    /// Hovering a bookmarked record clears the drop target
    pub fn enter(&mut self, index: usize, list: &[NftRecord]) {
        if self.from.is_none() {
            return;
        }
        self.to = match list.get(index) {
            Some(item) if !item.is_bookmarked() => Some(index),
            _ => None,
        };
    }

    pub fn leave(&mut self, index: usize) {
        if self.to == Some(index) {
            self.to = None;
        }
    }

    /// Finish a drop, returning the `(from, to)` pair to reorder with
    ///
    /// The state is reset either way.
    pub fn finish(&mut self) -> Option<(usize, usize)> {
        let pair = self.from.zip(self.to);
        self.end();
        pair
    }

    pub fn end(&mut self) {
        self.from = None;
        self.to = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.from.is_some()
    }

    pub fn item(&self, index: usize) -> ItemUiState {
        ItemUiState {
            dragging: self.from == Some(index),
            drop_target: self.to == Some(index),
        }
    }
}
