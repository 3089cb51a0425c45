//! Shared numeric constants for the planning engine.

// ── Geometry ────────────────────────────────────────────────────

/// Scale used when the wall or container is degenerate (zero or negative
/// size), so conversions stay finite instead of dividing by zero.
pub const FALLBACK_SCALE: f64 = 1.0;

// ── Spacing ─────────────────────────────────────────────────────

/// Gap below which an even-spacing plan is flagged as too tight, in inches.
pub const MIN_SPACING_IN: f64 = 0.5;

/// Conventional gallery center height for artwork, inches from the floor.
pub const DEFAULT_CENTER_HEIGHT_IN: f64 = 62.0;

// ── Snapping ────────────────────────────────────────────────────

/// Screen-space distance at which a dragged entity engages a snap line,
/// in pixels. Converted to inches at the current scale before use.
pub const SNAP_DISTANCE_PX: f64 = 10.0;
