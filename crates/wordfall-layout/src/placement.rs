#![forbid(unsafe_code)]

//! Randomized, collision-avoiding placement for word-cloud labels.
//!
//! # Algorithm
//!
//! Draw up to `max_tries` uniformly random origins inside the stage (inset
//! by `edge_padding` when the footprint leaves room for it) and accept the
//! first whose footprint intersects neither an existing item nor an
//! exclusion zone. When every try collides the last candidate is kept: an
//! overlapping label is a degraded outcome, not an error.
//!
//! Candidates never leave `[0, W - w] × [0, H - h]` when the footprint fits
//! the stage; a footprint larger than the stage is pinned to the origin on
//! that axis.

use rand::Rng;
use wordfall_core::geometry::{Point, Rect, Size};

/// Tunables for random placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Random positions tried before giving up (default: 200).
    pub max_tries: u32,
    /// Preferred distance from the stage edges, in px (default: 20).
    pub edge_padding: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_tries: 200,
            edge_padding: 20.0,
        }
    }
}

/// Outcome of a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Point,
    /// The retry budget ran out and the label overlaps something.
    pub overlapping: bool,
    /// Candidates drawn, including the accepted one.
    pub attempts: u32,
}

impl Placement {
    /// The placed footprint.
    #[must_use]
    pub fn rect(&self, footprint: Size) -> Rect {
        Rect::at(self.origin, footprint)
    }
}

/// Inclusive candidate range on one axis.
fn axis_range(extent: f32, size: f32, padding: f32) -> (f32, f32) {
    let slack = (extent - size).max(0.0);
    let lo = padding.max(0.0).min(slack);
    let hi = (slack - padding).max(lo);
    (lo, hi)
}

/// Find an origin for `footprint` inside `bounds`.
pub fn place<R: Rng>(
    footprint: Size,
    existing: &[Rect],
    bounds: Size,
    exclusions: &[Rect],
    config: &PlacementConfig,
    rng: &mut R,
) -> Placement {
    let (x_lo, x_hi) = axis_range(bounds.width, footprint.width, config.edge_padding);
    let (y_lo, y_hi) = axis_range(bounds.height, footprint.height, config.edge_padding);
    let tries = config.max_tries.max(1);

    let mut origin = Point::new(x_lo, y_lo);
    for attempt in 1..=tries {
        origin = Point::new(rng.random_range(x_lo..=x_hi), rng.random_range(y_lo..=y_hi));
        let candidate = Rect::at(origin, footprint);
        let blocked = existing
            .iter()
            .chain(exclusions)
            .any(|other| candidate.intersects(other));
        if !blocked {
            return Placement {
                origin,
                overlapping: false,
                attempts: attempt,
            };
        }
    }

    tracing::debug!(
        tries,
        width = footprint.width,
        height = footprint.height,
        "no free spot found; placing with overlap"
    );
    Placement {
        origin,
        overlapping: true,
        attempts: tries,
    }
}
