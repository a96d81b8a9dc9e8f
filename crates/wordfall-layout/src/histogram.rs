#![forbid(unsafe_code)]

//! Deterministic bar layout for the histogram view.
//!
//! Bars sit left to right, in Collection order, on a baseline near the
//! bottom of the stage. Each bar reserves a band at the top for its count
//! and a band at the bottom for its word; the fill grows upward in between.
//!
//! ```text
//!   left_inset
//!  |<-------->|  ┌──┐ gap ┌──┐
//!  |          |  │12│     │ 7│   count band
//!  |          |  │██│     │  │
//!  |          |  │██│     │██│   fill capacity
//!  |          |  │cat│    │dog│  label band
//!  ──────────────┴──┴─────┴──┴── baseline (H - edge_padding)
//! ```

use wordfall_core::geometry::{Point, Size};

/// Tunables for the histogram view.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramConfig {
    /// Narrowest bar, in px (default: 28).
    pub min_bar_width: f32,
    /// Space between bars, in px (default: 12).
    pub gap: f32,
    /// Space left of the first bar for the axis label, in px (default: 130).
    pub left_inset: f32,
    /// Space below the baseline, in px (default: 12).
    pub edge_padding: f32,
    /// Word label band at the bottom of each bar, in px (default: 36).
    pub label_band: f32,
    /// Count label band at the top of each bar, in px (default: 22).
    pub count_band: f32,
    /// Smallest fill drawn for a nonzero count, in px (default: 2).
    pub min_fill: f32,
    /// Shortest bar, in px (default: 120).
    pub min_bar_height: f32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            min_bar_width: 28.0,
            gap: 12.0,
            left_inset: 130.0,
            edge_padding: 12.0,
            label_band: 36.0,
            count_band: 22.0,
            min_fill: 2.0,
            min_bar_height: 120.0,
        }
    }
}

/// Resolved bar dimensions for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub bar_width: f32,
    pub bar_height: f32,
    /// Top edge shared by every bar.
    pub top: f32,
    /// Room for the fill between the two label bands.
    pub fill_capacity: f32,
}

impl HistogramConfig {
    /// Bar dimensions for `bars` bars on a stage of `bounds`.
    #[must_use]
    pub fn geometry(&self, bars: usize, bounds: Size) -> BarGeometry {
        let bars = bars.max(1) as f32;
        let bar_width = (100.0 / bars).floor().max(self.min_bar_width);
        let stage_height = bounds.height.max(160.0);
        let bar_height = (stage_height - 60.0).floor().max(self.min_bar_height);
        let top = (bounds.height - self.edge_padding - bar_height).max(0.0);
        let fill_capacity = (bar_height - self.label_band - self.count_band).max(0.0);
        BarGeometry {
            bar_width,
            bar_height,
            top,
            fill_capacity,
        }
    }

    /// Top-left corner of the bar in `slot` (0-based, left to right).
    #[must_use]
    pub fn slot_origin(&self, geometry: &BarGeometry, slot: usize) -> Point {
        Point::new(
            self.left_inset + slot as f32 * (geometry.bar_width + self.gap),
            geometry.top,
        )
    }

    /// Fill height for `count` relative to `max_count`.
    ///
    /// Zero counts draw nothing; any nonzero count draws at least
    /// `min_fill` (itself capped by the capacity).
    #[must_use]
    pub fn fill_height(&self, count: usize, max_count: usize, geometry: &BarGeometry) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let capacity = geometry.fill_capacity;
        let ratio = count as f32 / max_count.max(1) as f32;
        (ratio * capacity)
            .round()
            .clamp(self.min_fill.min(capacity), capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_for_typical_stage() {
        let cfg = HistogramConfig::default();
        let g = cfg.geometry(10, Size::new(1200.0, 500.0));
        assert_eq!(g.bar_width, 28.0); // floor(100 / 10) = 10 < 28
        assert_eq!(g.bar_height, 440.0);
        assert_eq!(g.top, 500.0 - 12.0 - 440.0);
        assert_eq!(g.fill_capacity, 440.0 - 36.0 - 22.0);
    }

    #[test]
    fn few_bars_are_wider() {
        let cfg = HistogramConfig::default();
        assert_eq!(cfg.geometry(2, Size::new(800.0, 400.0)).bar_width, 50.0);
        assert_eq!(cfg.geometry(0, Size::new(800.0, 400.0)).bar_width, 100.0);
    }

    #[test]
    fn short_stage_uses_minimum_bar_height() {
        let cfg = HistogramConfig::default();
        let g = cfg.geometry(5, Size::new(800.0, 100.0));
        assert_eq!(g.bar_height, 120.0);
        assert_eq!(g.top, 0.0);
    }

    #[test]
    fn slots_run_left_to_right() {
        let cfg = HistogramConfig::default();
        let g = cfg.geometry(10, Size::new(1200.0, 500.0));
        assert_eq!(cfg.slot_origin(&g, 0), Point::new(130.0, g.top));
        assert_eq!(cfg.slot_origin(&g, 3).x, 130.0 + 3.0 * 40.0);
    }

    #[test]
    fn fill_is_proportional_with_floor() {
        let cfg = HistogramConfig::default();
        let g = cfg.geometry(3, Size::new(800.0, 400.0));
        let cap = g.fill_capacity;
        assert_eq!(cfg.fill_height(10, 10, &g), cap);
        assert_eq!(cfg.fill_height(5, 10, &g), (cap / 2.0).round());
        assert_eq!(cfg.fill_height(1, 100_000, &g), 2.0);
        assert_eq!(cfg.fill_height(0, 10, &g), 0.0);
    }

    #[test]
    fn fill_never_exceeds_capacity() {
        let cfg = HistogramConfig::default();
        let g = cfg.geometry(3, Size::new(800.0, 400.0));
        // A stale max smaller than the count still caps at capacity.
        assert_eq!(cfg.fill_height(50, 10, &g), g.fill_capacity);
    }
}
