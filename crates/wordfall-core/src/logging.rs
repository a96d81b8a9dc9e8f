#![forbid(unsafe_code)]

//! Gesture diagnostics.
//!
//! The recognizer only reports at `trace` level: stale sessions and
//! releases with no matching press. With the `tracing` feature the crate
//! forwards to [`tracing::trace!`]; without it `trace!` expands to nothing
//! and the arguments are never evaluated.

#[cfg(feature = "tracing")]
pub use tracing::trace;

#[cfg(not(feature = "tracing"))]
mod noop {
    /// Discards its arguments; built without the `tracing` feature.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn trace_accepts_structured_fields() {
        crate::trace!(pointer = 7u32, "release without press ignored");
        crate::trace!(pointer = 7u32, item = 3u64, "replacing stale pointer session");
    }
}
