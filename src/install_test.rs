#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::store::EntityKind;

// =============================================================
// Helpers
// =============================================================

fn wall() -> Wall {
    Wall {
        id: Uuid::new_v4(),
        name: "North Gallery".to_owned(),
        width: 120.0,
        height: 96.0,
        color: String::new(),
    }
}

fn artwork(name: &str, x: f64, y: f64, w: f64, h: f64, hang: f64) -> Entity {
    Entity {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        kind: EntityKind::Artwork,
        width: w,
        height: h,
        x,
        y,
        hanging_point: Some(hang),
    }
}

/// A: hang point (22, 44); B: (52, 42); C: (90, 70).
fn trio() -> (Entity, Entity, Entity) {
    (
        artwork("A", 10.0, 10.0, 24.0, 36.0, 2.0),
        artwork("B", 40.0, 10.0, 24.0, 36.0, 4.0),
        artwork("C", 80.0, 50.0, 20.0, 20.0, 0.0),
    )
}

fn step_names(instructions: &Instructions) -> Vec<String> {
    instructions
        .steps
        .iter()
        .map(|step| match step {
            InstructionStep::Start { name, .. } | InstructionStep::Relative { name, .. } => {
                name.clone()
            }
        })
        .collect()
}

// =============================================================
// Hang points
// =============================================================

#[test]
fn hang_point_is_center_top_minus_offset() {
    let (a, _, _) = trio();
    let result = generate(&wall(), &[&a], a.id, References::default()).unwrap();
    assert_eq!(result.hang_points[0].x, 22.0);
    assert_eq!(result.hang_points[0].y, 44.0);
}

#[test]
fn missing_hanging_point_defaults_to_top_edge() {
    let mut a = artwork("A", 10.0, 10.0, 24.0, 36.0, 0.0);
    a.hanging_point = None;
    let result = generate(&wall(), &[&a], a.id, References::default()).unwrap();
    assert_eq!(result.hang_points[0].y, 46.0);
}

#[test]
fn right_wall_reference_mirrors_x() {
    let (a, _, _) = trio();
    let refs = References { wall: WallReference::Right, height: HeightReference::Floor };
    let result = generate(&wall(), &[&a], a.id, refs).unwrap();
    assert_eq!(result.hang_points[0].x, 120.0 - 22.0);
    assert_eq!(result.hang_points[0].y, 44.0);
}

#[test]
fn ceiling_reference_mirrors_y() {
    let (a, _, _) = trio();
    let refs = References { wall: WallReference::Left, height: HeightReference::Ceiling };
    let result = generate(&wall(), &[&a], a.id, refs).unwrap();
    assert_eq!(result.hang_points[0].x, 22.0);
    assert_eq!(result.hang_points[0].y, 96.0 - 44.0);
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn hang_points_sorted_left_to_right() {
    let (a, b, c) = trio();
    // Input order scrambled; output sorted by x ascending.
    let result = generate(&wall(), &[&c, &a, &b], a.id, References::default()).unwrap();
    let names: Vec<_> = result.hang_points.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn equal_x_ties_break_by_higher_first() {
    let high = artwork("high", 10.0, 60.0, 24.0, 20.0, 0.0); // hang y 80
    let low = artwork("low", 10.0, 10.0, 24.0, 20.0, 0.0); // hang y 30
    let result = generate(&wall(), &[&low, &high], low.id, References::default()).unwrap();
    let names: Vec<_> = result.hang_points.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["high", "low"]);
}

#[test]
fn right_reference_reverses_walk_order() {
    let (a, b, c) = trio();
    let refs = References { wall: WallReference::Right, height: HeightReference::Floor };
    let result = generate(&wall(), &[&a, &b, &c], c.id, refs).unwrap();
    // Mirrored x: C is now closest to the reference edge.
    let names: Vec<_> = result.hang_points.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);
}

// =============================================================
// Steps
// =============================================================

#[test]
fn start_step_is_absolute() {
    let (a, b, c) = trio();
    let result = generate(&wall(), &[&a, &b, &c], a.id, References::default()).unwrap();
    assert_eq!(
        result.steps[0],
        InstructionStep::Start { name: "A".to_owned(), from_edge: 22.0, from_datum: 44.0 }
    );
}

#[test]
fn forward_steps_are_deltas_from_previous_nail() {
    let (a, b, c) = trio();
    let result = generate(&wall(), &[&a, &b, &c], a.id, References::default()).unwrap();
    assert_eq!(
        result.steps[1],
        InstructionStep::Relative { name: "B".to_owned(), from: "A".to_owned(), dx: 30.0, dy: -2.0 }
    );
    assert_eq!(
        result.steps[2],
        InstructionStep::Relative { name: "C".to_owned(), from: "B".to_owned(), dx: 38.0, dy: 28.0 }
    );
}

#[test]
fn backward_pass_walks_left_from_start() {
    let (a, b, c) = trio();
    let result = generate(&wall(), &[&a, &b, &c], b.id, References::default()).unwrap();
    let names = step_names(&result);
    // Start at B, forward to C, then backward to A.
    assert_eq!(names, vec!["B", "C", "A"]);
    assert_eq!(
        result.steps[2],
        InstructionStep::Relative {
            name: "A".to_owned(),
            from: "B".to_owned(),
            dx: -30.0,
            dy: 2.0,
        }
    );
}

#[test]
fn start_at_right_end_walks_everything_backward() {
    let (a, b, c) = trio();
    let result = generate(&wall(), &[&a, &b, &c], c.id, References::default()).unwrap();
    assert_eq!(step_names(&result), vec!["C", "B", "A"]);
}

#[test]
fn every_artwork_stepped_exactly_once() {
    let (a, b, c) = trio();
    let result = generate(&wall(), &[&a, &b, &c], b.id, References::default()).unwrap();
    let mut names = step_names(&result);
    names.sort();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn single_artwork_has_only_the_start_step() {
    let (a, _, _) = trio();
    let result = generate(&wall(), &[&a], a.id, References::default()).unwrap();
    assert_eq!(result.steps.len(), 1);
}

// =============================================================
// Determinism
// =============================================================

#[test]
fn identical_inputs_produce_identical_output() {
    let (a, b, c) = trio();
    let refs = References { wall: WallReference::Right, height: HeightReference::Ceiling };
    let first = generate(&wall(), &[&a, &b, &c], b.id, refs).unwrap();
    let second = generate(&wall(), &[&a, &b, &c], b.id, refs).unwrap();
    assert_eq!(first.steps, second.steps);
    assert_eq!(first.hang_points, second.hang_points);
    assert_eq!(first.render_text(), second.render_text());
}

// =============================================================
// Errors
// =============================================================

#[test]
fn empty_set_fails() {
    let (a, _, _) = trio();
    assert_eq!(
        generate(&wall(), &[], a.id, References::default()).unwrap_err(),
        InstructionError::NoArtworks
    );
}

#[test]
fn degenerate_artwork_fails_by_name() {
    let (a, mut b, _) = trio();
    b.width = 0.0;
    let err = generate(&wall(), &[&a, &b], a.id, References::default()).unwrap_err();
    assert_eq!(err, InstructionError::DegenerateArtwork("B".to_owned()));
}

#[test]
fn unknown_start_fails() {
    let (a, b, _) = trio();
    let stranger = Uuid::new_v4();
    let err = generate(&wall(), &[&a, &b], stranger, References::default()).unwrap_err();
    assert_eq!(err, InstructionError::StartNotFound(stranger));
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_text_names_wall_and_start() {
    let (a, b, _) = trio();
    let result = generate(&wall(), &[&a, &b], a.id, References::default()).unwrap();
    let text = result.render_text();
    assert!(text.contains("North Gallery"));
    assert!(text.contains("STARTING POINT - A"));
    assert!(text.contains("from the left wall, from the floor"));
}

#[test]
fn render_text_uses_directions_for_left_floor_frame() {
    let (a, b, _) = trio();
    let result = generate(&wall(), &[&a, &b], a.id, References::default()).unwrap();
    let text = result.render_text();
    // B is 30" to the right of and 2" below A's nail.
    assert!(text.contains("measure RIGHT 30.00\""));
    assert!(text.contains("DOWN 2.00\""));
}

#[test]
fn render_text_flips_directions_in_mirrored_frames() {
    let (a, b, _) = trio();
    let refs = References { wall: WallReference::Right, height: HeightReference::Floor };
    let result = generate(&wall(), &[&a, &b], b.id, refs).unwrap();
    let text = result.render_text();
    // Mirrored frame: walking from B to A means increasing mirrored-x,
    // which is physically toward the LEFT wall.
    assert!(text.contains("measure LEFT 30.00\""));
}

#[test]
fn render_numbers_steps_sequentially() {
    let (a, b, c) = trio();
    let result = generate(&wall(), &[&a, &b, &c], a.id, References::default()).unwrap();
    let text = result.render_text();
    assert!(text.contains("1. STARTING POINT"));
    assert!(text.contains("2. B:"));
    assert!(text.contains("3. C:"));
}
