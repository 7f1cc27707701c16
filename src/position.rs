//! Drag-to-reposition state machine.
//!
//! The controller only decides which block is grabbed and where it should
//! move; the session owns the anchors and applies the updates.

use crate::model::{BlockId, Point};
use log::debug;

/// Default vertical grab distance in pixels
pub const GRAB_THRESHOLD: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(BlockId),
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    threshold: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(GRAB_THRESHOLD)
    }
}

impl DragController {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether the "dragging" outline should be drawn
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pointer pressed at `pos`. `anchor_of` yields each block's current
    /// effective anchor. Only the vertical distance matters; the top block
    /// is tested first and wins ties.
    pub fn pointer_down<F>(&mut self, pos: Point, anchor_of: F) -> Option<BlockId>
    where
        F: Fn(BlockId) -> Point,
    {
        if self.is_dragging() {
            return None;
        }
        let hit = BlockId::ORDER
            .into_iter()
            .find(|id| (pos.y - anchor_of(*id).y).abs() <= self.threshold);
        if let Some(id) = hit {
            debug!("drag start on {:?} at ({}, {})", id, pos.x, pos.y);
            self.state = DragState::Dragging(id);
        }
        hit
    }

    /// Pointer moved; returns the block to move and its new anchor.
    pub fn pointer_move(&self, pos: Point) -> Option<(BlockId, Point)> {
        match self.state {
            DragState::Dragging(id) => Some((id, pos)),
            DragState::Idle => None,
        }
    }

    /// Pointer released; always returns to idle.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging(id) = self.state {
            debug!("drag end on {:?}", id);
        }
        self.state = DragState::Idle;
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
