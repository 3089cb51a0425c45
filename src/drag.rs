//! Drag-session state for the gesture state machine.
//!
//! A session is born on pointer-down over an entity, lives through move
//! ticks, and dies on pointer-up (commit) or an interruption (cancel). It
//! carries everything needed to compute each tick's position from the drag
//! origin rather than from the previous tick, so the math never accumulates
//! rounding drift and replays identically at any sampling density.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::measure::EdgeDistances;
use crate::space::{ScreenPoint, WallPoint, WallSpace};
use crate::store::EntityId;

/// A single in-flight pointer drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The entity being dragged.
    pub entity_id: EntityId,
    /// Committed position at pointer-down; the anchor for all move math and
    /// the revert target on cancel.
    pub origin: WallPoint,
    /// Pointer position at pointer-down, screen space.
    pub pointer_origin: ScreenPoint,
    /// Coordinate mapping captured at pointer-down. Viewport resizes that
    /// arrive mid-session are deferred, so this stays valid until the
    /// session ends.
    pub space: WallSpace,
    /// Z-order slot the entity occupied before being raised to the front,
    /// restored on cancel.
    pub prev_z: usize,
    /// Ids overlapping the entity as of the last tick. Presentation state
    /// for the renderer; never blocks the drag.
    pub colliding: Vec<EntityId>,
    /// Edge guides as of the last tick.
    pub distances: EdgeDistances,
}

/// State of the gesture state machine: at most one session is ever active.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No drag in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A drag is being tracked between pointer-down and pointer-up.
    Active(DragSession),
}

impl DragState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Active(session) => Some(session),
        }
    }
}
