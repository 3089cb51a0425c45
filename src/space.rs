//! Coordinate conversion between wall space and screen space.
//!
//! Wall space is the persisted coordinate system: inches, origin at the
//! bottom-left corner of the wall, y growing up from the floor. Screen space
//! is the rendered system: pixels, origin top-left, y growing down. A
//! [`WallSpace`] binds the two together with a single uniform scale factor
//! derived from the container size, and is the only place in the crate where
//! the y-axis flips.

#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;

use crate::consts::FALLBACK_SCALE;

/// A point in screen space (pixels, origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in wall space (inches, origin bottom-left, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPoint {
    pub x: f64,
    pub y: f64,
}

impl WallPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Uniform mapping between wall inches and screen pixels.
///
/// The scale is pixels-per-inch, identical on both axes, chosen so the whole
/// wall fits inside the container. Re-derived with [`WallSpace::fit`] on
/// every container resize; never cached across resizes.
#[derive(Debug, Clone, Copy)]
pub struct WallSpace {
    wall_width: f64,
    wall_height: f64,
    scale: f64,
}

impl WallSpace {
    /// Fit a wall into a container, preserving aspect ratio.
    ///
    /// `scale = min(container_width / wall_width, container_height / wall_height)`.
    /// Degenerate inputs (any dimension zero, negative, or NaN) fall back to
    /// [`FALLBACK_SCALE`] with a warning rather than producing `Inf`/`NaN`.
    #[must_use]
    pub fn fit(container_width_px: f64, container_height_px: f64, wall_width_in: f64, wall_height_in: f64) -> Self {
        // NaN fails every `>` comparison, so it lands in the fallback arm too.
        let usable = wall_width_in > 0.0
            && wall_height_in > 0.0
            && container_width_px > 0.0
            && container_height_px > 0.0;
        let scale = if usable {
            (container_width_px / wall_width_in).min(container_height_px / wall_height_in)
        } else {
            tracing::warn!(
                container_width_px,
                container_height_px,
                wall_width_in,
                wall_height_in,
                "degenerate wall or container, using fallback scale"
            );
            FALLBACK_SCALE
        };
        Self { wall_width: wall_width_in, wall_height: wall_height_in, scale }
    }

    /// Identity mapping (1 px per inch) for a wall not yet fitted to a
    /// container. Used before the first viewport measurement arrives.
    #[must_use]
    pub fn unscaled(wall_width_in: f64, wall_height_in: f64) -> Self {
        Self { wall_width: wall_width_in, wall_height: wall_height_in, scale: FALLBACK_SCALE }
    }

    /// Pixels per inch. Always finite and positive.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn wall_width(&self) -> f64 {
        self.wall_width
    }

    #[must_use]
    pub fn wall_height(&self) -> f64 {
        self.wall_height
    }

    /// Screen position of the top-left corner of an entity whose bottom-left
    /// corner sits at `pos` and whose height is `height_in`.
    #[must_use]
    pub fn to_screen(&self, pos: WallPoint, height_in: f64) -> ScreenPoint {
        ScreenPoint {
            x: pos.x * self.scale,
            y: (self.wall_height - pos.y - height_in) * self.scale,
        }
    }

    /// Exact inverse of [`WallSpace::to_screen`]: the wall-space bottom-left
    /// corner of an entity whose top-left corner renders at `screen`.
    #[must_use]
    pub fn to_wall(&self, screen: ScreenPoint, height_in: f64) -> WallPoint {
        WallPoint {
            x: screen.x / self.scale,
            y: self.wall_height - screen.y / self.scale - height_in,
        }
    }

    /// Convert a screen-space pointer delta to a wall-space delta in inches.
    ///
    /// Screen y grows downward while wall y grows up from the floor, so the
    /// vertical component flips sign: dragging up (negative `dy_px`) raises
    /// the entity.
    #[must_use]
    pub fn wall_delta(&self, dx_px: f64, dy_px: f64) -> (f64, f64) {
        (dx_px / self.scale, -dy_px / self.scale)
    }
}
