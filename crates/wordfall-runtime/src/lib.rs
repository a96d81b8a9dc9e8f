#![forbid(unsafe_code)]

//! Runtime for Wordfall: the interaction session and its timers.
//!
//! # Role in Wordfall
//! `wordfall-runtime` wires the pieces together. A [`Session`] owns the
//! stage, the gesture recognizer and the deferred-removal scheduler, and
//! exposes a small host-facing API: analyse text, search, feed pointer
//! events, tick.
//!
//! # Key modules
//! - [`session`]: the host-facing [`Session`] and its [`InteractionEffect`]s.
//! - [`scheduler`]: cancellable deferred removals.
//! - [`capture`]: the pointer-capture seam.
//! - [`burst`]: the click burst plan for cloud labels.
//! - [`config`]: [`EngineConfig`], loadable from TOML/JSON with the
//!   `config` feature.

pub mod burst;
pub mod capture;
pub mod config;
pub mod scheduler;
pub mod session;

pub use burst::FrequencyBurst;
pub use capture::{CaptureError, NoCapture, PointerCapture};
pub use config::{ConfigError, EngineConfig};
pub use scheduler::{RemovalScheduler, ScheduledRemoval};
pub use session::{Analysis, InteractionEffect, SearchReport, Session, SessionError};
