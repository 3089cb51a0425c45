//! Even-spacing planner: distribute artworks across a horizontal span with
//! equal gaps.
//!
//! Planning is pure — it reads entity sizes and produces target positions
//! without touching the store. The engine applies an approved plan as a
//! batch of committed moves, one persistence event per entity.

#[cfg(test)]
#[path = "spacing_test.rs"]
mod spacing_test;

use crate::consts::MIN_SPACING_IN;
use crate::store::{Entity, EntityId};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SpacingError {
    #[error("artworks exceed the available space: {required}\" needed, {available}\" available")]
    InsufficientSpace { required: f64, available: f64 },
    #[error("left boundary must be less than the right boundary")]
    EmptySpan,
    #[error("boundaries must lie within the wall")]
    OutOfBounds,
    #[error("no artworks selected")]
    NoSelection,
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
}

/// Target position for one entity in an approved plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedPosition {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
}

/// The outcome of planning: equal gaps and per-entity targets.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingPlan {
    /// The uniform gap, in inches. There are `count + 1` gaps: one before
    /// the first piece, one between each pair, one after the last.
    pub gap: f64,
    /// Targets in the caller's selection order, left to right.
    pub positions: Vec<PlannedPosition>,
    /// The gap fell below the minimum comfortable spacing. The plan is
    /// still valid; callers must ask the user to confirm before applying.
    pub narrow: bool,
}

/// Plan equal-gap positions for `entities` over `[left, right]`, each piece
/// vertically centered at `center_height` inches from the floor.
///
/// # Errors
///
/// `EmptySpan` if `left >= right`, `InsufficientSpace` if the pieces are
/// wider than the span, `NoSelection` for an empty list.
pub fn plan(
    entities: &[&Entity],
    left: f64,
    right: f64,
    center_height: f64,
) -> Result<SpacingPlan, SpacingError> {
    if entities.is_empty() {
        return Err(SpacingError::NoSelection);
    }
    if !left.is_finite() || !right.is_finite() || left >= right {
        return Err(SpacingError::EmptySpan);
    }

    let total_width: f64 = entities.iter().map(|entity| entity.width).sum();
    let available = right - left;
    if total_width > available {
        return Err(SpacingError::InsufficientSpace { required: total_width, available });
    }

    #[allow(clippy::cast_precision_loss)]
    let gap = (available - total_width) / (entities.len() as f64 + 1.0);

    let mut positions = Vec::with_capacity(entities.len());
    let mut cursor = left + gap;
    for entity in entities {
        positions.push(PlannedPosition {
            id: entity.id,
            x: cursor,
            y: center_height - entity.height / 2.0,
        });
        cursor += entity.width + gap;
    }

    Ok(SpacingPlan { gap, positions, narrow: gap < MIN_SPACING_IN })
}
