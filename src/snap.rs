//! Snap lines: user-defined guides that dragged entities align to.
//!
//! A line sits at a fixed distance from a wall edge (the floor for
//! horizontal lines, the left wall for vertical ones) and declares which
//! part of an entity mates with it. Snapping nudges the candidate drag
//! position when the mating edge or center is within the engagement
//! threshold; it never initiates movement on its own.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which way a snap line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Runs across the wall at a height; entities align vertically to it.
    Horizontal,
    /// Runs floor-to-top at an offset; entities align horizontally to it.
    Vertical,
}

/// Which part of the entity mates with the line.
///
/// `Top`/`Center`/`Bottom` apply to horizontal lines, `Left`/`Center`/
/// `Right` to vertical ones. An alignment from the wrong axis is treated
/// as `Center`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Top,
    #[default]
    Center,
    Bottom,
    Left,
    Right,
}

/// A snap guide on the wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapLine {
    pub id: Uuid,
    pub orientation: Orientation,
    /// Inches from the reference edge: the floor for horizontal lines, the
    /// left wall edge for vertical ones.
    pub distance: f64,
    #[serde(default)]
    pub alignment: Alignment,
    /// Whether entities snap to this line at all.
    #[serde(default = "default_true")]
    pub snap_to: bool,
    /// Whether the line itself can be repositioned.
    #[serde(default = "default_true")]
    pub moveable: bool,
}

fn default_true() -> bool {
    true
}

/// The entity coordinate (bottom-left `x` or `y`) that would put the mating
/// part exactly on the line.
fn snap_target(line: &SnapLine, width: f64, height: f64) -> f64 {
    match line.orientation {
        Orientation::Horizontal => match line.alignment {
            Alignment::Bottom => line.distance,
            Alignment::Top => line.distance - height,
            _ => line.distance - height / 2.0,
        },
        Orientation::Vertical => match line.alignment {
            Alignment::Left => line.distance,
            Alignment::Right => line.distance - width,
            _ => line.distance - width / 2.0,
        },
    }
}

/// Adjust a candidate drag position toward the nearest engaged snap line.
///
/// Each axis snaps independently to the closest line whose target is within
/// `threshold_in`. Lines with `snap_to` disabled are skipped. Returns the
/// (possibly unchanged) position; the caller re-clamps afterwards so a snap
/// can never push an entity out of the wall.
#[must_use]
pub fn apply(x: f64, y: f64, width: f64, height: f64, lines: &[SnapLine], threshold_in: f64) -> (f64, f64) {
    let mut snapped_x = x;
    let mut snapped_y = y;
    let mut best_dx = threshold_in;
    let mut best_dy = threshold_in;

    for line in lines.iter().filter(|line| line.snap_to) {
        let target = snap_target(line, width, height);
        match line.orientation {
            Orientation::Vertical => {
                let delta = (x - target).abs();
                if delta <= best_dx {
                    best_dx = delta;
                    snapped_x = target;
                }
            }
            Orientation::Horizontal => {
                let delta = (y - target).abs();
                if delta <= best_dy {
                    best_dy = delta;
                    snapped_y = target;
                }
            }
        }
    }

    (snapped_x, snapped_y)
}
