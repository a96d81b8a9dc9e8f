#![forbid(unsafe_code)]

//! The on-screen representation of one word.

use wordfall_core::geometry::Rect;
use wordfall_core::gesture::ItemId;

/// Visual state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemState {
    #[default]
    Normal,
    /// Held by a pointer past the drag threshold.
    Dragging,
    /// Fading out; removed once the grace period elapses. Terminal.
    Deleting,
}

/// How the item entered the Collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemOrigin {
    /// Part of a bulk analysis result.
    Ranked,
    /// Added by a search. `found == false` items carry count 0 and are
    /// rendered muted.
    Searched { found: bool },
}

/// A word-cloud label or histogram bar.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub id: ItemId,
    pub label: String,
    pub count: usize,
    /// Position and size in stage coordinates.
    pub rect: Rect,
    /// Bar fill in pixels, proportional to `count / max count`.
    pub fill_height: f32,
    pub state: ItemState,
    /// Manually placed by the user; exempt from reflow and sorting.
    pub pinned: bool,
    pub origin: ItemOrigin,
}

impl DisplayItem {
    pub(crate) fn new(id: ItemId, label: impl Into<String>, count: usize, origin: ItemOrigin) -> Self {
        Self {
            id,
            label: label.into(),
            count,
            rect: Rect::default(),
            fill_height: 0.0,
            state: ItemState::Normal,
            pinned: false,
            origin,
        }
    }

    #[inline]
    #[must_use]
    pub fn x(&self) -> f32 {
        self.rect.x
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> f32 {
        self.rect.y
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.rect.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rect.height
    }

    #[inline]
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.state == ItemState::Deleting
    }

    /// Held by a pointer; reflow leaves its rect to the drag.
    #[inline]
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.state == ItemState::Dragging
    }

    /// Whether automatic reflow and sorting may move this item.
    #[inline]
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        !self.pinned && !self.is_deleting()
    }
}
