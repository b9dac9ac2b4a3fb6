//! Swipe-to-reveal gesture for list rows.
//!
//! Rows can only be dragged to the left. A release past the threshold parks
//! the row at the reveal offset and exposes its delete action; anything short
//! of that snaps back.

use crate::constants::{SWIPE_MAX_DRAG, SWIPE_REVEAL_OFFSET, SWIPE_REVEAL_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeState {
    Closed,
    Dragging { start_x: f64, offset: f64 },
    Revealed,
}

/// Gesture state of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeRow {
    state: SwipeState,
}

impl Default for SwipeRow {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeRow {
    pub fn new() -> Self {
        Self {
            state: SwipeState::Closed,
        }
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    /// Horizontal offset the row is rendered at.
    pub fn offset(&self) -> f64 {
        match self.state {
            SwipeState::Closed => 0.0,
            SwipeState::Dragging { offset, .. } => offset,
            SwipeState::Revealed => SWIPE_REVEAL_OFFSET,
        }
    }

    /// Pointer down at `x`. The row stays where it rests until the pointer
    /// moves; offsets are then measured from `x`.
    pub fn press(&mut self, x: f64) {
        self.state = SwipeState::Dragging {
            start_x: x,
            offset: self.offset(),
        };
    }

    /// Pointer moved to `x`. Ignored unless dragging.
    pub fn move_to(&mut self, x: f64) {
        if let SwipeState::Dragging { start_x, .. } = self.state {
            let offset = (x - start_x).clamp(SWIPE_MAX_DRAG, 0.0);
            self.state = SwipeState::Dragging { start_x, offset };
        }
    }

    /// Pointer released. Ignored unless dragging.
    pub fn release(&mut self) {
        if let SwipeState::Dragging { offset, .. } = self.state {
            self.state = if offset < SWIPE_REVEAL_THRESHOLD {
                SwipeState::Revealed
            } else {
                SwipeState::Closed
            };
        }
    }

    /// A tap on the row content closes it.
    pub fn tap(&mut self) {
        self.state = SwipeState::Closed;
    }

    /// Whether the delete action is reachable.
    pub fn can_delete(&self) -> bool {
        self.state == SwipeState::Revealed
    }
}
