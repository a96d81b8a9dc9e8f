// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, pointer events, and gesture recognition.
//!
//! # Role in Wordfall
//! `wordfall-core` is the input layer. It owns the geometric primitives the
//! layout engine works in, the typed pointer events the host forwards, and
//! the gesture state machine that turns pointer sessions into clicks,
//! double-clicks and drags.
//!
//! # How it fits in the system
//! `wordfall-layout` places items using [`geometry::Rect`]. The runtime
//! (`wordfall-runtime`) feeds [`pointer::PointerEvent`] values through a
//! [`gesture::GestureRecognizer`] and applies the resulting
//! [`gesture::GestureEvent`]s to the stage.

pub mod error;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod pointer;

pub use error::CoreError;

#[cfg(feature = "tracing")]
pub use logging::trace;
