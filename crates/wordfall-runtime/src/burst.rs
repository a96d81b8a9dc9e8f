#![forbid(unsafe_code)]

//! Click burst plan for word-cloud labels.
//!
//! Clicking a cloud label releases one falling drop per occurrence of the
//! word. The drops are staggered so a burst of a few dozen reads as a
//! shower and a burst of hundreds still finishes promptly. Drawing the
//! drops is the host's job; this only says how many and when.

use web_time::Duration;
use wordfall_core::gesture::ItemId;

/// Drops released by one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyBurst {
    pub item: ItemId,
    /// One per occurrence.
    pub drops: usize,
    /// Delay between consecutive drops.
    pub stagger: Duration,
}

impl FrequencyBurst {
    #[must_use]
    pub fn new(item: ItemId, count: usize) -> Self {
        Self {
            item,
            drops: count,
            stagger: Self::stagger_for(count),
        }
    }

    /// 20 ms up to 50 drops, 10 ms up to 150, 3 ms beyond.
    #[must_use]
    pub fn stagger_for(count: usize) -> Duration {
        match count {
            0..=50 => Duration::from_millis(20),
            51..=150 => Duration::from_millis(10),
            _ => Duration::from_millis(3),
        }
    }

    /// Release offset of drop `index` from the click.
    #[must_use]
    pub fn offset(&self, index: usize) -> Duration {
        self.stagger * u32::try_from(index).unwrap_or(u32::MAX)
    }

    /// Offset of the last drop; zero for an empty burst.
    #[must_use]
    pub fn span(&self) -> Duration {
        self.drops.checked_sub(1).map_or(Duration::ZERO, |last| self.offset(last))
    }

    pub fn offsets(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.drops).map(|i| self.offset(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_bands() {
        assert_eq!(FrequencyBurst::stagger_for(1), Duration::from_millis(20));
        assert_eq!(FrequencyBurst::stagger_for(50), Duration::from_millis(20));
        assert_eq!(FrequencyBurst::stagger_for(51), Duration::from_millis(10));
        assert_eq!(FrequencyBurst::stagger_for(150), Duration::from_millis(10));
        assert_eq!(FrequencyBurst::stagger_for(151), Duration::from_millis(3));
    }

    #[test]
    fn offsets_are_evenly_spaced() {
        let burst = FrequencyBurst::new(ItemId(1), 4);
        let offsets: Vec<u128> = burst.offsets().map(|d| d.as_millis()).collect();
        assert_eq!(offsets, vec![0, 20, 40, 60]);
        assert_eq!(burst.span(), Duration::from_millis(60));
    }

    #[test]
    fn empty_burst() {
        let burst = FrequencyBurst::new(ItemId(1), 0);
        assert_eq!(burst.offsets().count(), 0);
        assert_eq!(burst.span(), Duration::ZERO);
    }
}
