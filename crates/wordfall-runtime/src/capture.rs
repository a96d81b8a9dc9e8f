#![forbid(unsafe_code)]

//! Pointer capture seam.
//!
//! Hosts that route a pressed pointer's events to the pressed item (the
//! browser's pointer capture, for instance) release that capture when the
//! press ends. The pointer may already be gone by then; release failures
//! are logged and otherwise ignored.

use thiserror::Error;
use wordfall_core::pointer::PointerId;

/// Why a capture release failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The pointer is no longer known to the host.
    #[error("{0} is no longer valid")]
    InvalidPointer(PointerId),
    /// Any other host-side failure.
    #[error("pointer capture release failed: {0}")]
    Host(String),
}

/// Host hook for releasing pointer capture.
pub trait PointerCapture {
    fn release_pointer_capture(&mut self, pointer: PointerId) -> Result<(), CaptureError>;
}

/// A host without pointer capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn release_pointer_capture(&mut self, _pointer: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }
}

impl<F> PointerCapture for F
where
    F: FnMut(PointerId) -> Result<(), CaptureError>,
{
    fn release_pointer_capture(&mut self, pointer: PointerId) -> Result<(), CaptureError> {
        self(pointer)
    }
}

/// Release `pointer`, tolerating failure.
pub(crate) fn release(capture: &mut impl PointerCapture, pointer: PointerId) {
    if let Err(err) = capture.release_pointer_capture(pointer) {
        tracing::debug!(%pointer, error = %err, "pointer capture release failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_capture_always_succeeds() {
        assert_eq!(NoCapture.release_pointer_capture(PointerId(3)), Ok(()));
    }

    #[test]
    fn closures_are_captures() {
        let mut released = Vec::new();
        let mut capture = |pointer: PointerId| -> Result<(), CaptureError> {
            released.push(pointer);
            Err(CaptureError::InvalidPointer(pointer))
        };
        release(&mut capture, PointerId(1));
        release(&mut capture, PointerId(2));
        assert_eq!(released, vec![PointerId(1), PointerId(2)]);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CaptureError::InvalidPointer(PointerId(4)).to_string(),
            "pointer#4 is no longer valid"
        );
    }
}
