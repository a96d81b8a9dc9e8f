#![forbid(unsafe_code)]

//! Contract errors raised at the input boundary.

use thiserror::Error;

/// Errors produced when a host hands the core malformed data.
///
/// These indicate a collaborator bug, not bad user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A pointer event carried a NaN or infinite coordinate.
    #[error("pointer {pointer} has non-finite coordinates ({x}, {y})")]
    NonFinitePointer { pointer: u32, x: f32, y: f32 },
    /// A size or rectangle had a negative or non-finite extent.
    #[error("invalid extent {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },
}
