//! Hanging-instruction generator.
//!
//! Given the final layout, computes each artwork's physical nail point and
//! emits a step-by-step nailing sequence: one absolute measurement for the
//! chosen starting piece, then every other piece as a delta from the
//! previous nail. An installer can keep the tape measure anchored at the
//! last nail instead of re-measuring from the wall corner each time.
//!
//! Coordinates are expressed in the installer's chosen reference frame
//! (left or right wall edge, floor or ceiling); both choices are pure
//! reflections of the wall-space coordinates.

#[cfg(test)]
#[path = "install_test.rs"]
mod install_test;

use crate::store::{Entity, EntityId, Wall};

/// Which wall edge horizontal measurements start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallReference {
    #[default]
    Left,
    Right,
}

/// Which datum vertical measurements start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightReference {
    #[default]
    Floor,
    Ceiling,
}

/// The installer's chosen measurement frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct References {
    pub wall: WallReference,
    pub height: HeightReference,
}

/// An artwork's nail point in the chosen reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HangPoint {
    pub id: EntityId,
    pub name: String,
    /// Inches from the chosen wall edge.
    pub x: f64,
    /// Inches from the chosen datum (floor or ceiling).
    pub y: f64,
}

/// One step of the nailing sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionStep {
    /// Absolute measurement for the starting piece: offsets from the chosen
    /// wall edge and datum.
    Start { name: String, from_edge: f64, from_datum: f64 },
    /// Delta from the previous nail in the current pass. `dx` is positive
    /// moving away from the reference edge, `dy` positive moving away from
    /// the datum.
    Relative { name: String, from: String, dx: f64, dy: f64 },
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InstructionError {
    #[error("no artwork placed on the wall")]
    NoArtworks,
    #[error("starting piece not found: {0}")]
    StartNotFound(EntityId),
    #[error("artwork has non-positive dimensions: {0}")]
    DegenerateArtwork(String),
}

/// A complete, deterministic instruction set.
#[derive(Debug, Clone, PartialEq)]
pub struct Instructions {
    pub wall_name: String,
    pub refs: References,
    /// Name of the starting piece.
    pub start: String,
    /// Nail points sorted left-to-right for display (x ascending, then y
    /// descending). Display order only; the steps below walk outward from
    /// the starting piece.
    pub hang_points: Vec<HangPoint>,
    pub steps: Vec<InstructionStep>,
}

/// Compute the nailing sequence for `artworks` on `wall`.
///
/// # Errors
///
/// `NoArtworks` for an empty set, `DegenerateArtwork` if any piece has a
/// non-positive dimension, `StartNotFound` if `start` is not among the
/// given artworks.
pub fn generate(
    wall: &Wall,
    artworks: &[&Entity],
    start: EntityId,
    refs: References,
) -> Result<Instructions, InstructionError> {
    if artworks.is_empty() {
        return Err(InstructionError::NoArtworks);
    }
    if let Some(bad) = artworks.iter().find(|entity| entity.is_degenerate()) {
        return Err(InstructionError::DegenerateArtwork(bad.name.clone()));
    }

    let mut points: Vec<HangPoint> = artworks
        .iter()
        .map(|entity| {
            let mut x = entity.x + entity.width / 2.0;
            let mut y = (entity.y + entity.height) - entity.hanging_point.unwrap_or(0.0);
            if refs.wall == WallReference::Right {
                x = wall.width - x;
            }
            if refs.height == HeightReference::Ceiling {
                y = wall.height - y;
            }
            HangPoint { id: entity.id, name: entity.name.clone(), x, y }
        })
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| b.y.total_cmp(&a.y)));

    let start_index = points
        .iter()
        .position(|point| point.id == start)
        .ok_or(InstructionError::StartNotFound(start))?;
    let first = &points[start_index];

    let mut steps = vec![InstructionStep::Start {
        name: first.name.clone(),
        from_edge: first.x,
        from_datum: first.y,
    }];

    // Forward pass: from the starting piece out to the right end.
    let mut prev = first;
    for point in &points[start_index + 1..] {
        steps.push(InstructionStep::Relative {
            name: point.name.clone(),
            from: prev.name.clone(),
            dx: point.x - prev.x,
            dy: point.y - prev.y,
        });
        prev = point;
    }

    // Backward pass: from the starting piece out to the left end.
    prev = first;
    for point in points[..start_index].iter().rev() {
        steps.push(InstructionStep::Relative {
            name: point.name.clone(),
            from: prev.name.clone(),
            dx: point.x - prev.x,
            dy: point.y - prev.y,
        });
        prev = point;
    }

    Ok(Instructions {
        wall_name: wall.name.clone(),
        refs,
        start: first.name.clone(),
        hang_points: points,
        steps,
    })
}

impl Instructions {
    /// Horizontal direction word for a signed delta in this frame.
    fn x_direction(&self, dx: f64) -> &'static str {
        match (self.refs.wall, dx >= 0.0) {
            (WallReference::Left, true) | (WallReference::Right, false) => "RIGHT",
            (WallReference::Left, false) | (WallReference::Right, true) => "LEFT",
        }
    }

    /// Vertical direction word for a signed delta in this frame.
    fn y_direction(&self, dy: f64) -> &'static str {
        match (self.refs.height, dy >= 0.0) {
            (HeightReference::Floor, true) | (HeightReference::Ceiling, false) => "UP",
            (HeightReference::Floor, false) | (HeightReference::Ceiling, true) => "DOWN",
        }
    }

    /// Render the printable form of the instruction set. File encoding and
    /// download are the host's concern.
    #[must_use]
    pub fn render_text(&self) -> String {
        let edge = match self.refs.wall {
            WallReference::Left => "left",
            WallReference::Right => "right",
        };
        let datum = match self.refs.height {
            HeightReference::Floor => "floor",
            HeightReference::Ceiling => "ceiling",
        };

        let mut out = String::new();
        out.push_str("GALLERY WALL INSTALLATION INSTRUCTIONS\n");
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!("Wall: {}\n", self.wall_name));
        out.push_str(&format!("Total artworks: {}\n", self.hang_points.len()));
        out.push_str(&format!("Reference point: from the {edge} wall, from the {datum}\n"));
        out.push_str(&format!("Starting piece: {}\n\n", self.start));
        out.push_str("- Mark all nail positions with pencil before installing\n");
        out.push_str("- Use a level to keep each piece straight\n\n");

        for (number, step) in self.steps.iter().enumerate() {
            match step {
                InstructionStep::Start { name, from_edge, from_datum } => {
                    out.push_str(&format!("{}. STARTING POINT - {name}:\n", number + 1));
                    out.push_str(&format!(
                        "   From the {edge} wall edge, measure {from_edge:.3}\"; from the {datum}, measure {from_datum:.3}\".\n"
                    ));
                    out.push_str("   Mark this point - it is your first nail position.\n");
                }
                InstructionStep::Relative { name, from, dx, dy } => {
                    out.push_str(&format!("{}. {name}:\n", number + 1));
                    out.push_str(&format!(
                        "   From {from}'s nail: measure {} {:.2}\", then {} {:.2}\".\n",
                        self.x_direction(*dx),
                        dx.abs(),
                        self.y_direction(*dy),
                        dy.abs()
                    ));
                }
            }
        }

        out
    }
}
