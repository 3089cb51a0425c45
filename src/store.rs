//! Wall and entity data model, and the in-memory entity store.
//!
//! This module defines the canonical shapes for everything placed on a wall
//! (`Entity`, `EntityKind`), the wall itself (`Wall`), a sparse-update type
//! for incremental edits (`PartialEntity`), and the runtime store that owns
//! all live entities (`EntityStore`).
//!
//! Data flows into this layer from the network (JSON deserialization) and
//! from the drag engine (mutations). Legacy payloads name positions
//! `x_position`/`y_position`; that drift is absorbed once here with serde
//! aliases, so the rest of the crate only ever sees `x`/`y`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collision::Rect;
use crate::space::WallPoint;

/// Unique identifier for a wall entity.
pub type EntityId = Uuid;

/// What kind of entity sits on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A movable piece of art.
    Artwork,
    /// A fixed obstacle (window, thermostat, door frame) that art must
    /// avoid. Draggable while planning, but never hung.
    PermanentObject,
}

/// The wall being planned. Defines the coordinate bounds for all entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: Uuid,
    pub name: String,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    /// Display color hint, carried opaquely for the renderer.
    #[serde(default)]
    pub color: String,
}

/// A positioned rectangle on the wall, as stored and as sent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    /// Left edge, inches from the left wall edge.
    #[serde(alias = "x_position")]
    pub x: f64,
    /// Bottom edge, inches up from the floor.
    #[serde(alias = "y_position")]
    pub y: f64,
    /// Nail/hook point, inches down from the top edge. Artworks only;
    /// used by the installation-instruction generator.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "hanging_point_offset")]
    pub hanging_point: Option<f64>,
}

impl Entity {
    /// Bounding rectangle in wall space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bottom-left corner in wall space.
    #[must_use]
    pub fn position(&self) -> WallPoint {
        WallPoint::new(self.x, self.y)
    }

    /// Whether the entity has a usable size. Degenerate entities are kept
    /// in the store (the backend owns their lifecycle) but rejected by the
    /// instruction generator.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Sparse update for an entity. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hanging_point: Option<f64>,
}

/// In-memory store of wall entities.
///
/// Placed entities carry a z-order (insertion order, last drawn topmost).
/// Unplaced artworks are inventory loaded from the backend that has no wall
/// position yet; placing one moves it onto the wall at the top of the order.
pub struct EntityStore {
    wall: Wall,
    entities: HashMap<EntityId, Entity>,
    /// Z-order over placed entities, bottom first.
    order: Vec<EntityId>,
    unplaced: Vec<Entity>,
}

impl EntityStore {
    /// Create an empty store for `wall`.
    #[must_use]
    pub fn new(wall: Wall) -> Self {
        Self { wall, entities: HashMap::new(), order: Vec::new(), unplaced: Vec::new() }
    }

    /// Build a store from a backend snapshot.
    #[must_use]
    pub fn from_snapshot(wall: Wall, placed: Vec<Entity>, unplaced: Vec<Entity>) -> Self {
        let mut store = Self::new(wall);
        for entity in placed {
            store.insert(entity);
        }
        store.unplaced = unplaced;
        store
    }

    #[must_use]
    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    /// Replace the wall (explicit edit). Entity positions are untouched;
    /// out-of-bounds entities will be re-clamped on their next drag.
    pub fn set_wall(&mut self, wall: Wall) {
        self.wall = wall;
    }

    /// Insert or replace a placed entity. A new id goes to the top of the
    /// z-order; an existing id keeps its slot.
    pub fn insert(&mut self, entity: Entity) {
        let id = entity.id;
        if self.entities.insert(id, entity).is_none() {
            self.order.push(id);
        }
    }

    /// Add an artwork to the unplaced inventory.
    pub fn add_unplaced(&mut self, entity: Entity) {
        self.unplaced.push(entity);
    }

    /// Move an unplaced artwork onto the wall at `pos`, on top of the
    /// z-order. Returns `false` (and logs) if the id is not in the
    /// unplaced inventory.
    pub fn place(&mut self, id: &EntityId, pos: WallPoint) -> bool {
        let Some(index) = self.unplaced.iter().position(|e| e.id == *id) else {
            tracing::warn!(%id, "place: entity not in unplaced inventory");
            return false;
        };
        let mut entity = self.unplaced.remove(index);
        entity.x = pos.x;
        entity.y = pos.y;
        self.insert(entity);
        true
    }

    /// Remove an entity by id from either list, returning it if present.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        if let Some(entity) = self.entities.remove(id) {
            self.order.retain(|other| other != id);
            return Some(entity);
        }
        let index = self.unplaced.iter().position(|e| e.id == *id)?;
        Some(self.unplaced.remove(index))
    }

    /// Look up a placed entity by id.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Set a placed entity's committed position. Returns `false` (and logs)
    /// if the entity no longer exists.
    pub fn set_position(&mut self, id: &EntityId, pos: WallPoint) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            tracing::warn!(%id, "set_position: entity not found");
            return false;
        };
        entity.x = pos.x;
        entity.y = pos.y;
        true
    }

    /// Apply a partial update to a placed entity. Returns `false` if the
    /// entity doesn't exist.
    pub fn apply_partial(&mut self, id: &EntityId, partial: &PartialEntity) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            entity.x = x;
        }
        if let Some(y) = partial.y {
            entity.y = y;
        }
        if let Some(width) = partial.width {
            entity.width = width;
        }
        if let Some(height) = partial.height {
            entity.height = height;
        }
        if let Some(ref name) = partial.name {
            entity.name = name.clone();
        }
        if let Some(hanging_point) = partial.hanging_point {
            entity.hanging_point = Some(hanging_point);
        }
        true
    }

    /// Placed entities in z-order, bottom first.
    pub fn placed(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Unplaced artwork inventory, in load order.
    #[must_use]
    pub fn unplaced(&self) -> &[Entity] {
        &self.unplaced
    }

    /// Topmost placed entity whose rectangle contains `pt` (edges count),
    /// scanning from the top of the z-order down.
    #[must_use]
    pub fn topmost_at(&self, pt: WallPoint) -> Option<EntityId> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.entities.get(id))
            .find(|entity| entity.rect().contains(pt.x, pt.y))
            .map(|entity| entity.id)
    }

    /// Raise an entity to the top of the z-order, returning the slot it
    /// occupied so a cancelled drag can put it back.
    pub fn bring_to_front(&mut self, id: &EntityId) -> Option<usize> {
        let index = self.order.iter().position(|other| other == id)?;
        let moved = self.order.remove(index);
        self.order.push(moved);
        Some(index)
    }

    /// Return an entity to a z-order slot recorded by
    /// [`EntityStore::bring_to_front`].
    pub fn restore_z(&mut self, id: &EntityId, index: usize) {
        let Some(current) = self.order.iter().position(|other| other == id) else {
            return;
        };
        let moved = self.order.remove(current);
        self.order.insert(index.min(self.order.len()), moved);
    }

    /// Number of placed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is placed on the wall.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
