#![forbid(unsafe_code)]

//! Wordfall public facade crate.
//!
//! Re-exports the types a host needs from the internal crates and offers a
//! prelude. Most hosts only touch [`Session`]:
//!
//! ```
//! use wordfall::prelude::*;
//!
//! let mut session = Session::new(EngineConfig::default(), Size::new(800.0, 600.0))?;
//! let analysis = session.analyze("the cat saw the other cat", 10, true)?;
//! assert_eq!(analysis.entries[0].word, "cat");
//! assert_eq!(session.items().len(), analysis.entries.len());
//! # Ok::<(), wordfall::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use wordfall_core::CoreError;
pub use wordfall_core::geometry::{Point, Rect, Size};
pub use wordfall_core::gesture::{DragMode, GestureConfig, GestureEvent, GestureRecognizer, ItemId, PressTarget};
pub use wordfall_core::pointer::{PointerEvent, PointerId, PointerPhase};

// --- Text re-exports -------------------------------------------------------

pub use wordfall_text::{
    FrequencyEntry, FrequencyTable, SearchHit, SearchOutcome, TextError, TopN, frequency_of, is_stopword,
    normalize_token, rank, tokenize,
};

// --- Layout re-exports -----------------------------------------------------

pub use wordfall_layout::{
    DisplayItem, HistogramConfig, ItemOrigin, ItemState, LabelMetrics, LayoutError, PlacementConfig,
    SearchPlacement, Stage, StageConfig, ViewMode,
};

// --- Runtime re-exports ----------------------------------------------------

pub use wordfall_runtime::{
    Analysis, CaptureError, ConfigError, EngineConfig, FrequencyBurst, InteractionEffect, NoCapture,
    PointerCapture, SearchReport, Session, SessionError,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Wordfall hosts.
#[derive(Debug)]
pub enum Error {
    /// Malformed pointer input or extent.
    Core(CoreError),
    /// Invalid ranking request.
    Text(TextError),
    /// Invalid stage bounds.
    Layout(LayoutError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Text(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Text(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<TextError> for Error {
    fn from(err: TextError) -> Self {
        Self::Text(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Config(err) => Self::Config(err),
            SessionError::Layout(err) => Self::Layout(err),
        }
    }
}

/// Standard result type for Wordfall APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DisplayItem, EngineConfig, Error, FrequencyEntry, InteractionEffect, ItemId, NoCapture, Point,
        PointerEvent, Rect, Result, SearchOutcome, Session, Size, ViewMode,
    };

    pub use crate::{core, layout, runtime, text};
}

pub use wordfall_core as core;
pub use wordfall_layout as layout;
pub use wordfall_runtime as runtime;
pub use wordfall_text as text;
