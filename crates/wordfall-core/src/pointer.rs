#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native mouse/touch/pen events into [`PointerEvent`]
//! values. Coordinates are validated once, here, so nothing downstream has
//! to guard against NaN.
//!
//! # Design Notes
//!
//! - Coordinates are stage-local (the host subtracts the stage's client
//!   offset before constructing the event).
//! - Each touch contact or mouse gets its own [`PointerId`]; simultaneous
//!   contacts are tracked independently.
//! - `Cancel` is the platform telling us the pointer is gone (e.g. the touch
//!   was taken over by scrolling). It ends the session without a click.

use crate::error::CoreError;
use crate::geometry::Point;

/// Identifier of a pointer (mouse, pen, or a single touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PointerId(pub u32);

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pointer#{}", self.0)
    }
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Button pressed or contact started.
    Down,
    /// Pointer moved while tracked.
    Move,
    /// Button released or contact lifted.
    Up,
    /// The platform abandoned the pointer.
    Cancel,
}

/// A single pointer event in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub position: Point,
    pub phase: PointerPhase,
}

impl PointerEvent {
    /// Create a pointer event, rejecting non-finite coordinates.
    pub fn new(pointer: PointerId, x: f32, y: f32, phase: PointerPhase) -> Result<Self, CoreError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CoreError::NonFinitePointer {
                pointer: pointer.0,
                x,
                y,
            });
        }
        Ok(Self {
            pointer,
            position: Point::new(x, y),
            phase,
        })
    }

    /// Convenience constructor for a `Down` event.
    pub fn down(pointer: u32, x: f32, y: f32) -> Result<Self, CoreError> {
        Self::new(PointerId(pointer), x, y, PointerPhase::Down)
    }

    /// Convenience constructor for a `Move` event.
    pub fn moved(pointer: u32, x: f32, y: f32) -> Result<Self, CoreError> {
        Self::new(PointerId(pointer), x, y, PointerPhase::Move)
    }

    /// Convenience constructor for an `Up` event.
    pub fn up(pointer: u32, x: f32, y: f32) -> Result<Self, CoreError> {
        Self::new(PointerId(pointer), x, y, PointerPhase::Up)
    }

    /// Convenience constructor for a `Cancel` event.
    pub fn cancel(pointer: u32, x: f32, y: f32) -> Result<Self, CoreError> {
        Self::new(PointerId(pointer), x, y, PointerPhase::Cancel)
    }
}
