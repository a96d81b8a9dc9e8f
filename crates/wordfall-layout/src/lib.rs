#![forbid(unsafe_code)]

//! Layout for Wordfall: where ranked words go and how they move.
//!
//! # Role in Wordfall
//! `wordfall-layout` owns the Collection of [`DisplayItem`]s that the host
//! renders every frame. It knows two arrangements:
//!
//! - **Cloud**: labels scattered at random, non-overlapping positions
//!   ([`placement`]).
//! - **Histogram**: bars laid left to right on a shared baseline, with fill
//!   heights proportional to count ([`histogram`]).
//!
//! All mutation goes through [`Stage`], which keeps the display invariants:
//! one live item per label, fills relative to the current maximum, and the
//! user's pinned items left exactly where they were dropped.

pub mod histogram;
pub mod item;
pub mod metrics;
pub mod placement;
pub mod stage;

use thiserror::Error;
use wordfall_core::CoreError;

pub use histogram::{BarGeometry, HistogramConfig};
pub use item::{DisplayItem, ItemOrigin, ItemState};
pub use metrics::LabelMetrics;
pub use placement::{Placement, PlacementConfig, place};
pub use stage::{SearchPlacement, Stage, StageConfig, ViewMode};

/// Errors for contract violations by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Stage bounds were negative or non-finite.
    #[error("invalid stage bounds: {0}")]
    InvalidBounds(#[source] CoreError),
}
