#![forbid(unsafe_code)]

//! Engine configuration as data.
//!
//! Every tunable of the engine lives in one [`EngineConfig`] that can be
//! loaded from TOML or JSON (with the `config` feature) and converted into
//! the per-component configs.
//!
//! # Loading
//!
//! ```toml
//! # wordfall.toml
//! seed = 7
//!
//! [gesture]
//! drag_threshold = 8.0
//!
//! [ranking]
//! max_top_n = 50
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("wordfall.toml")?;
//! let config = EngineConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the matching component default, so
//! `EngineConfig::default()` behaves exactly like the component configs'
//! own `Default` impls.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;
use wordfall_core::gesture::GestureConfig;
use wordfall_layout::{HistogramConfig, LabelMetrics, PlacementConfig, StageConfig};

// ---------------------------------------------------------------------------
// Top-level EngineConfig
// ---------------------------------------------------------------------------

/// All engine tunables.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EngineConfig {
    pub gesture: GestureSection,
    pub placement: PlacementSection,
    pub labels: LabelSection,
    pub histogram: HistogramSection,
    pub deletion: DeletionSection,
    pub ranking: RankingSection,
    /// Placement RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut positive = |name: &str, value: f32| {
            if !(value.is_finite() && value > 0.0) {
                errors.push(format!("{name} must be positive and finite, got {value}"));
            }
        };

        positive("labels.glyph_advance", self.labels.glyph_advance);
        positive("labels.line_height", self.labels.line_height);
        positive("histogram.min_bar_width", self.histogram.min_bar_width);
        positive("histogram.min_bar_height", self.histogram.min_bar_height);

        let mut non_negative = |name: &str, value: f32| {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("{name} must be non-negative and finite, got {value}"));
            }
        };
        non_negative("gesture.drag_threshold", self.gesture.drag_threshold);
        non_negative("placement.edge_padding", self.placement.edge_padding);
        non_negative("labels.padding_x", self.labels.padding_x);
        non_negative("histogram.gap", self.histogram.gap);
        non_negative("histogram.left_inset", self.histogram.left_inset);
        non_negative("histogram.edge_padding", self.histogram.edge_padding);
        non_negative("histogram.label_band", self.histogram.label_band);
        non_negative("histogram.count_band", self.histogram.count_band);
        non_negative("histogram.min_fill", self.histogram.min_fill);

        if self.gesture.double_click_ms == 0 {
            errors.push("gesture.double_click_ms must be > 0".into());
        }
        if self.placement.max_tries == 0 {
            errors.push("placement.max_tries must be > 0".into());
        }
        if self.ranking.default_top_n == 0 {
            errors.push("ranking.default_top_n must be > 0".into());
        }
        if self.ranking.max_top_n < self.ranking.default_top_n {
            errors.push(format!(
                "ranking.max_top_n ({}) must be >= ranking.default_top_n ({})",
                self.ranking.max_top_n, self.ranking.default_top_n
            ));
        }
        errors
    }

    /// `self` if it validates, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            drag_threshold: self.gesture.drag_threshold,
            double_click_window: Duration::from_millis(self.gesture.double_click_ms),
        }
    }

    #[must_use]
    pub fn to_placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            max_tries: self.placement.max_tries,
            edge_padding: self.placement.edge_padding,
        }
    }

    #[must_use]
    pub fn to_label_metrics(&self) -> LabelMetrics {
        LabelMetrics {
            glyph_advance: self.labels.glyph_advance,
            line_height: self.labels.line_height,
            padding_x: self.labels.padding_x,
        }
    }

    #[must_use]
    pub fn to_histogram_config(&self) -> HistogramConfig {
        let h = &self.histogram;
        HistogramConfig {
            min_bar_width: h.min_bar_width,
            gap: h.gap,
            left_inset: h.left_inset,
            edge_padding: h.edge_padding,
            label_band: h.label_band,
            count_band: h.count_band,
            min_fill: h.min_fill,
            min_bar_height: h.min_bar_height,
        }
    }

    #[must_use]
    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            labels: self.to_label_metrics(),
            placement: self.to_placement_config(),
            histogram: self.to_histogram_config(),
        }
    }

    /// How long a deleting item stays visible before removal.
    #[must_use]
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.deletion.grace_ms)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Click/drag disambiguation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureSection {
    /// Movement on either axis, in px, that turns a press into a drag.
    pub drag_threshold: f32,
    /// Maximum gap between two releases that counts as a double click.
    pub double_click_ms: u64,
}

impl Default for GestureSection {
    fn default() -> Self {
        let base = GestureConfig::default();
        Self {
            drag_threshold: base.drag_threshold,
            double_click_ms: base.double_click_window.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PlacementSection {
    pub max_tries: u32,
    pub edge_padding: f32,
}

impl Default for PlacementSection {
    fn default() -> Self {
        let base = PlacementConfig::default();
        Self {
            max_tries: base.max_tries,
            edge_padding: base.edge_padding,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LabelSection {
    pub glyph_advance: f32,
    pub line_height: f32,
    pub padding_x: f32,
}

impl Default for LabelSection {
    fn default() -> Self {
        let base = LabelMetrics::default();
        Self {
            glyph_advance: base.glyph_advance,
            line_height: base.line_height,
            padding_x: base.padding_x,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HistogramSection {
    pub min_bar_width: f32,
    pub gap: f32,
    pub left_inset: f32,
    pub edge_padding: f32,
    pub label_band: f32,
    pub count_band: f32,
    pub min_fill: f32,
    pub min_bar_height: f32,
}

impl Default for HistogramSection {
    fn default() -> Self {
        let base = HistogramConfig::default();
        Self {
            min_bar_width: base.min_bar_width,
            gap: base.gap,
            left_inset: base.left_inset,
            edge_padding: base.edge_padding,
            label_band: base.label_band,
            count_band: base.count_band,
            min_fill: base.min_fill,
            min_bar_height: base.min_bar_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DeletionSection {
    /// Fade-out time before a deleted item is removed.
    pub grace_ms: u64,
}

impl Default for DeletionSection {
    fn default() -> Self {
        Self { grace_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RankingSection {
    /// Used when the host has no preference of its own.
    pub default_top_n: usize,
    /// Upper bound applied to every requested top N.
    pub max_top_n: usize,
    pub exclude_stopwords: bool,
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            default_top_n: 10,
            max_top_n: 100,
            exclude_stopwords: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_component_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.to_gesture_config(), GestureConfig::default());
        assert_eq!(config.to_placement_config(), PlacementConfig::default());
        assert_eq!(config.to_label_metrics(), LabelMetrics::default());
        assert_eq!(config.to_histogram_config(), HistogramConfig::default());
        assert_eq!(config.to_stage_config(), StageConfig::default());
        assert_eq!(config.grace_period(), Duration::from_millis(300));
        assert_eq!(config.ranking.max_top_n, 100);
        assert!(config.seed.is_none());
    }

    #[test]
    fn default_validates_clean() {
        assert!(EngineConfig::default().validate().is_empty());
        assert!(EngineConfig::default().validated().is_ok());
    }

    #[test]
    fn validate_catches_zero_window() {
        let mut config = EngineConfig::default();
        config.gesture.double_click_ms = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("double_click_ms"));
    }

    #[test]
    fn validate_catches_non_finite_metrics() {
        let mut config = EngineConfig::default();
        config.labels.glyph_advance = f32::NAN;
        config.histogram.gap = -1.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 2, "{errors:?}");
    }

    #[test]
    fn validate_catches_inverted_top_n() {
        let mut config = EngineConfig::default();
        config.ranking.max_top_n = 5;
        assert!(config.validate()[0].contains("max_top_n"));
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = EngineConfig::default();
        config.placement.max_tries = 0;
        config.ranking.default_top_n = 0;
        config.labels.line_height = 0.0;
        let err = config.validated().unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().starts_with("validation errors: "));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override_preserves_defaults() {
        let config = EngineConfig::from_toml_str(
            "seed = 7\n[gesture]\ndrag_threshold = 8.0\n[ranking]\nmax_top_n = 50\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.gesture.drag_threshold, 8.0);
        assert_eq!(config.gesture.double_click_ms, 300);
        assert_eq!(config.ranking.max_top_n, 50);
        assert_eq!(config.ranking.default_top_n, 10);
        assert_eq!(config.histogram, HistogramSection::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trips_through_files() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"deletion": {{"grace_ms": 450}}, "placement": {{"max_tries": 50}}}}"#)
            .unwrap();
        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grace_period(), Duration::from_millis(450));
        assert_eq!(config.placement.max_tries, 50);
        assert_eq!(config.placement.edge_padding, 20.0);
    }

    #[cfg(feature = "config")]
    #[test]
    fn parse_errors_are_typed() {
        assert!(matches!(
            EngineConfig::from_toml_str("[gesture\n"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_file("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
