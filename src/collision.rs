//! Axis-aligned overlap tests between wall entities.
//!
//! Collision is a detectable state, not a failure: the engine recomputes it
//! on every drag tick so the renderer can highlight overlapping entities,
//! but nothing here ever blocks a move. Entity counts per wall are small
//! (tens), so the linear scan needs no spatial index.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::store::{Entity, EntityId, EntityStore};

/// Axis-aligned rectangle in wall space (inches, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.bottom() && y <= self.top()
    }
}

/// Open-interval overlap test: rects that merely share an edge do not
/// collide, so pieces can sit flush against each other.
#[must_use]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.bottom() < b.top() && b.bottom() < a.top()
}

/// Ids of every other placed entity overlapping `target`, in z-order.
#[must_use]
pub fn colliding_ids(target: &Entity, store: &EntityStore) -> Vec<EntityId> {
    let rect = target.rect();
    store
        .placed()
        .filter(|other| other.id != target.id && collides(&rect, &other.rect()))
        .map(|other| other.id)
        .collect()
}

/// Whether any other placed entity overlaps `target`.
#[must_use]
pub fn any_collision(target: &Entity, store: &EntityStore) -> bool {
    let rect = target.rect();
    store
        .placed()
        .any(|other| other.id != target.id && collides(&rect, &other.rect()))
}
