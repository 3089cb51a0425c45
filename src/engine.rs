//! Orchestrating engine: pointer events in, actions out.
//!
//! The engine owns the entity store, the current coordinate mapping, the
//! snap lines, and the drag state machine. Hosts feed it pointer events in
//! screen pixels and viewport sizes; it returns [`Action`]s describing what
//! to persist and when to redraw. It performs no I/O itself — persistence
//! actions are handed to the host, which fires them through
//! [`crate::net::ApiClient`] without ever blocking the next pointer tick.
//!
//! Drag math is anchored at the session origin, not the previous tick, so
//! the final position is a pure function of the pointer's start and end
//! regardless of how many move events the host delivers in between.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::collision;
use crate::consts::SNAP_DISTANCE_PX;
use crate::drag::{DragSession, DragState};
use crate::install::{self, InstructionError, Instructions, References};
use crate::measure;
use crate::snap::{self, SnapLine};
use crate::space::{ScreenPoint, WallPoint, WallSpace};
use crate::spacing::{self, SpacingError, SpacingPlan};
use crate::store::{Entity, EntityId, EntityKind, EntityStore, PartialEntity, Wall};

/// Actions returned from engine handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A position became authoritative. The host persists it (fire and
    /// forget); a failure is reported to the user but never rolls the
    /// local store back.
    PositionCommitted { id: EntityId, kind: EntityKind, x: f64, y: f64 },
    /// Something visible changed; redraw.
    RenderNeeded,
}

/// Clamp one axis to `[0, max]`, tolerating entities larger than the wall.
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.max(0.0).min(max.max(0.0))
}

/// The planning engine. One per loaded wall session.
pub struct Engine {
    store: EntityStore,
    space: WallSpace,
    drag: DragState,
    snap_lines: Vec<SnapLine>,
    viewport: (f64, f64),
    /// Resize that arrived mid-drag; applied when the session ends so the
    /// session's captured mapping stays coherent with its pointer origin.
    pending_viewport: Option<(f64, f64)>,
}

impl Engine {
    /// Create an engine for `wall` with an empty store and an unfitted
    /// (1 px/in) mapping. Call [`Engine::set_viewport`] once the container
    /// has been measured.
    #[must_use]
    pub fn new(wall: Wall) -> Self {
        let space = WallSpace::unscaled(wall.width, wall.height);
        Self {
            store: EntityStore::new(wall),
            space,
            drag: DragState::Idle,
            snap_lines: Vec::new(),
            viewport: (0.0, 0.0),
            pending_viewport: None,
        }
    }

    /// Hydrate from a backend snapshot, replacing all local state. Any
    /// in-flight drag is discarded.
    pub fn load_snapshot(&mut self, wall: Wall, placed: Vec<Entity>, unplaced: Vec<Entity>) {
        self.drag = DragState::Idle;
        self.pending_viewport = None;
        self.store = EntityStore::from_snapshot(wall, placed, unplaced);
        self.refit();
    }

    /// Update the container size and re-derive the scale. Mid-drag resizes
    /// are deferred until the session ends.
    pub fn set_viewport(&mut self, width_px: f64, height_px: f64) -> Vec<Action> {
        if self.drag.is_active() {
            self.pending_viewport = Some((width_px, height_px));
            return Vec::new();
        }
        self.viewport = (width_px, height_px);
        self.refit();
        vec![Action::RenderNeeded]
    }

    /// Replace the wall (explicit edit). An active drag is cancelled first
    /// so its clamp bounds can't change underneath it.
    pub fn set_wall(&mut self, wall: Wall) -> Vec<Action> {
        let mut actions = self.cancel_drag();
        self.store.set_wall(wall);
        self.refit();
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Replace the wall's snap lines.
    pub fn set_snap_lines(&mut self, lines: Vec<SnapLine>) {
        self.snap_lines = lines;
    }

    fn refit(&mut self) {
        let wall = self.store.wall();
        let (width_px, height_px) = self.viewport;
        self.space = if width_px > 0.0 && height_px > 0.0 {
            WallSpace::fit(width_px, height_px, wall.width, wall.height)
        } else {
            WallSpace::unscaled(wall.width, wall.height)
        };
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub fn space(&self) -> WallSpace {
        self.space
    }

    #[must_use]
    pub fn wall(&self) -> &Wall {
        self.store.wall()
    }

    /// The live drag session with its per-tick collision ids and edge
    /// guides, if a drag is in progress.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn snap_lines(&self) -> &[SnapLine] {
        &self.snap_lines
    }

    // --- Drag state machine ---

    /// Pointer-down: start a drag if an entity is under the pointer.
    ///
    /// A pointer-down while a session is already active is ignored (single
    /// pointer assumption); the active session keeps its anchor.
    pub fn on_pointer_down(&mut self, screen: ScreenPoint) -> Vec<Action> {
        if self.drag.is_active() {
            return Vec::new();
        }
        let pt = self.space.to_wall(screen, 0.0);
        let Some(id) = self.store.topmost_at(pt) else {
            return Vec::new();
        };
        let Some(prev_z) = self.store.bring_to_front(&id) else {
            return Vec::new();
        };
        let Some(entity) = self.store.get(&id) else {
            return Vec::new();
        };
        let session = DragSession {
            entity_id: id,
            origin: entity.position(),
            pointer_origin: screen,
            space: self.space,
            prev_z,
            colliding: collision::colliding_ids(entity, &self.store),
            distances: measure::edge_distances(entity, self.store.wall()),
        };
        self.drag = DragState::Active(session);
        vec![Action::RenderNeeded]
    }

    /// Pointer-move: recompute the dragged entity's position, collisions,
    /// and edge guides. No-op when idle.
    pub fn on_pointer_move(&mut self, screen: ScreenPoint) -> Vec<Action> {
        let DragState::Active(session) = &self.drag else {
            return Vec::new();
        };
        let (id, origin, pointer_origin, space) =
            (session.entity_id, session.origin, session.pointer_origin, session.space);
        let Some(entity) = self.store.get(&id) else {
            return self.abandon_drag(&id);
        };
        let (width, height) = (entity.width, entity.height);
        let pos = self.drag_position(origin, pointer_origin, space, width, height, screen);
        self.store.set_position(&id, pos);

        let (colliding, distances) = match self.store.get(&id) {
            Some(entity) => (
                collision::colliding_ids(entity, &self.store),
                measure::edge_distances(entity, self.store.wall()),
            ),
            None => return self.abandon_drag(&id),
        };
        if let DragState::Active(session) = &mut self.drag {
            session.colliding = colliding;
            session.distances = distances;
        }
        vec![Action::RenderNeeded]
    }

    /// Pointer-up: commit the final clamped position and hand the host a
    /// persistence action. The dragged entity stays at the front of the
    /// z-order.
    pub fn on_pointer_up(&mut self, screen: ScreenPoint) -> Vec<Action> {
        let DragState::Active(session) = std::mem::take(&mut self.drag) else {
            return Vec::new();
        };
        let id = session.entity_id;
        let Some(entity) = self.store.get(&id) else {
            return self.abandon_drag(&id);
        };
        let (width, height, kind) = (entity.width, entity.height, entity.kind);
        let pos = self.drag_position(
            session.origin,
            session.pointer_origin,
            session.space,
            width,
            height,
            screen,
        );
        self.store.set_position(&id, pos);
        self.apply_pending_viewport();
        tracing::debug!(%id, x = pos.x, y = pos.y, "drag committed");
        vec![
            Action::PositionCommitted { id, kind, x: pos.x, y: pos.y },
            Action::RenderNeeded,
        ]
    }

    /// Cancel the active drag: revert the entity to its pre-drag position
    /// and z-order slot. No persistence call is made.
    pub fn cancel_drag(&mut self) -> Vec<Action> {
        let DragState::Active(session) = std::mem::take(&mut self.drag) else {
            return Vec::new();
        };
        self.store.set_position(&session.entity_id, session.origin);
        self.store.restore_z(&session.entity_id, session.prev_z);
        self.apply_pending_viewport();
        vec![Action::RenderNeeded]
    }

    /// Candidate position for a drag tick: origin-anchored delta, clamp to
    /// the wall, snap, clamp again.
    fn drag_position(
        &self,
        origin: WallPoint,
        pointer_origin: ScreenPoint,
        space: WallSpace,
        width: f64,
        height: f64,
        screen: ScreenPoint,
    ) -> WallPoint {
        let (dx, dy) = space.wall_delta(screen.x - pointer_origin.x, screen.y - pointer_origin.y);
        let wall = self.store.wall();
        let max_x = wall.width - width;
        let max_y = wall.height - height;
        let x = clamp_axis(origin.x + dx, max_x);
        let y = clamp_axis(origin.y + dy, max_y);
        let threshold = SNAP_DISTANCE_PX / space.scale();
        let (x, y) = snap::apply(x, y, width, height, &self.snap_lines, threshold);
        WallPoint::new(clamp_axis(x, max_x), clamp_axis(y, max_y))
    }

    /// The dragged entity vanished mid-session (deleted concurrently).
    /// Drop the session without committing anything.
    fn abandon_drag(&mut self, id: &EntityId) -> Vec<Action> {
        tracing::warn!(%id, "dragged entity disappeared, abandoning drag");
        self.drag = DragState::Idle;
        self.apply_pending_viewport();
        vec![Action::RenderNeeded]
    }

    fn apply_pending_viewport(&mut self) {
        if let Some((width_px, height_px)) = self.pending_viewport.take() {
            self.viewport = (width_px, height_px);
            self.refit();
        }
    }

    // --- Server broadcasts ---

    /// Apply a server echo: entity created.
    pub fn apply_create(&mut self, entity: Entity) {
        self.store.insert(entity);
    }

    /// Apply a server echo: entity updated.
    pub fn apply_update(&mut self, id: &EntityId, fields: &PartialEntity) {
        self.store.apply_partial(id, fields);
    }

    /// Apply a server echo: entity deleted. Cancels the drag if it targets
    /// the dragged entity.
    pub fn apply_delete(&mut self, id: &EntityId) {
        if self.drag.session().is_some_and(|session| session.entity_id == *id) {
            tracing::warn!(%id, "dragged entity deleted remotely, dropping session");
            self.drag = DragState::Idle;
            self.apply_pending_viewport();
        }
        if self.store.remove(id).is_none() {
            tracing::warn!(%id, "delete for unknown entity ignored");
        }
    }

    // --- Placement ---

    /// Move an unplaced artwork onto the wall at `pos` (clamped), placing
    /// it on top of the z-order and committing the position.
    pub fn place(&mut self, id: &EntityId, pos: WallPoint) -> Vec<Action> {
        let Some(entity) = self.store.unplaced().iter().find(|entity| entity.id == *id) else {
            tracing::warn!(%id, "place ignored: not in unplaced inventory");
            return Vec::new();
        };
        let kind = entity.kind;
        let wall = self.store.wall();
        let clamped = WallPoint::new(
            clamp_axis(pos.x, wall.width - entity.width),
            clamp_axis(pos.y, wall.height - entity.height),
        );
        if !self.store.place(id, clamped) {
            return Vec::new();
        }
        vec![
            Action::PositionCommitted { id: *id, kind, x: clamped.x, y: clamped.y },
            Action::RenderNeeded,
        ]
    }

    // --- Even spacing ---

    /// Plan equal-gap positions for the given entities over `[left, right]`.
    /// Pure: nothing moves until the plan is applied.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if the span leaves the wall, `UnknownEntity` for a
    /// stale id, plus the planner's own span/width errors.
    pub fn plan_spacing(
        &self,
        ids: &[EntityId],
        left: f64,
        right: f64,
        center_height: f64,
    ) -> Result<SpacingPlan, SpacingError> {
        let wall = self.store.wall();
        if left < 0.0 || right > wall.width {
            return Err(SpacingError::OutOfBounds);
        }
        let entities = ids
            .iter()
            .map(|id| self.store.get(id).ok_or(SpacingError::UnknownEntity(*id)))
            .collect::<Result<Vec<_>, _>>()?;
        spacing::plan(&entities, left, right, center_height)
    }

    /// Apply an approved spacing plan: each target becomes a committed,
    /// persisted position. Vertical targets are clamped into the wall.
    pub fn apply_spacing(&mut self, plan: &SpacingPlan) -> Vec<Action> {
        let mut actions = Vec::new();
        for target in &plan.positions {
            let Some(entity) = self.store.get(&target.id) else {
                tracing::warn!(id = %target.id, "spacing target no longer exists, skipping");
                continue;
            };
            let kind = entity.kind;
            let wall = self.store.wall();
            let pos = WallPoint::new(target.x, clamp_axis(target.y, wall.height - entity.height));
            if self.store.set_position(&target.id, pos) {
                actions.push(Action::PositionCommitted { id: target.id, kind, x: pos.x, y: pos.y });
            }
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Installation instructions ---

    /// Generate the nailing sequence for every placed artwork (fixed
    /// objects are not hung and are excluded).
    ///
    /// # Errors
    ///
    /// See [`install::generate`].
    pub fn installation_instructions(
        &self,
        start: EntityId,
        refs: References,
    ) -> Result<Instructions, InstructionError> {
        let artworks: Vec<&Entity> = self
            .store
            .placed()
            .filter(|entity| entity.kind == EntityKind::Artwork)
            .collect();
        install::generate(self.store.wall(), &artworks, start, refs)
    }
}
