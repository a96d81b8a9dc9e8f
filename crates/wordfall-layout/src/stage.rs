#![forbid(unsafe_code)]

//! The Collection and every operation that mutates it.
//!
//! # Invariants
//!
//! 1. Item ids are allocated from a monotonic counter and never reused, so
//!    an id held by a stale timer or pointer session can never alias a
//!    newer item.
//! 2. At most one live (non-deleting) item carries a given label.
//! 3. Pinned items are never moved, resized or re-sorted by bulk replace,
//!    search insertion, reflow or rescale. Only the user moves them.
//! 4. After every structural change, each non-deleting item's
//!    `fill_height` is proportional to `count / max(count)` over the
//!    non-deleting items, floored at `min_fill` for nonzero counts.
//! 5. A deleting item is frozen: nothing but [`Stage::remove`] touches it.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Unknown or removed id | `false` / `None`, traced |
//! | Cloud label finds no free spot | Placed overlapping (see [`place`]) |
//! | Negative or non-finite bounds | [`LayoutError::InvalidBounds`] |
//!
//! Bulk replacement builds the full new item vector before swapping it in,
//! so a reader between calls never sees a partially built Collection.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wordfall_core::geometry::{Point, Rect, Size};
use wordfall_core::gesture::ItemId;
use wordfall_text::FrequencyEntry;

use crate::LayoutError;
use crate::histogram::HistogramConfig;
use crate::item::{DisplayItem, ItemOrigin, ItemState};
use crate::metrics::LabelMetrics;
use crate::placement::{PlacementConfig, place};

/// How the Collection is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Labels scattered at random, non-overlapping positions.
    #[default]
    Cloud,
    /// Bars left to right on a shared baseline.
    Histogram,
}

/// Layout tunables grouped for the stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StageConfig {
    pub labels: LabelMetrics,
    pub placement: PlacementConfig,
    pub histogram: HistogramConfig,
}

/// What a search did to the Collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPlacement {
    /// A new item was created.
    Inserted(ItemId),
    /// An existing automatic item was moved to its sorted position.
    Repositioned(ItemId),
    /// The word is already shown as a pinned item; nothing moved.
    Pinned(ItemId),
    /// The word is shown by an item a pointer is dragging; only its count
    /// was refreshed.
    Held(ItemId),
}

impl SearchPlacement {
    #[inline]
    #[must_use]
    pub fn id(self) -> ItemId {
        match self {
            Self::Inserted(id) | Self::Repositioned(id) | Self::Pinned(id) | Self::Held(id) => id,
        }
    }
}

/// Owner of the displayed items.
#[derive(Debug, Clone)]
pub struct Stage {
    items: Vec<DisplayItem>,
    mode: ViewMode,
    bounds: Size,
    exclusions: Vec<Rect>,
    config: StageConfig,
    next_id: u64,
    generation: u64,
    rng: SmallRng,
}

impl Stage {
    /// Create an empty stage. Placement is seeded from `seed` when given,
    /// otherwise from the operating system.
    pub fn new(config: StageConfig, bounds: Size, seed: Option<u64>) -> Result<Self, LayoutError> {
        let bounds = Size::checked(bounds.width, bounds.height).map_err(LayoutError::InvalidBounds)?;
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            items: Vec::new(),
            mode: ViewMode::default(),
            bounds,
            exclusions: Vec::new(),
            config,
            next_id: 1,
            generation: 0,
            rng,
        })
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The Collection in visual order (left to right, bottom to top).
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// An owned copy of the Collection for a render pass.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DisplayItem> {
        self.items.clone()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&DisplayItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Collection index of `id`.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bumped by every bulk replace and clear.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn exclusions(&self) -> &[Rect] {
        &self.exclusions
    }

    /// The live item showing `label`, if any.
    #[must_use]
    pub fn find_label(&self, label: &str) -> Option<&DisplayItem> {
        self.items
            .iter()
            .find(|item| !item.is_deleting() && item.label == label)
    }

    /// Topmost live item under `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| !item.is_deleting() && item.rect.contains(point))
            .map(|item| item.id)
    }

    // ------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------

    /// Replace the whole Collection with `entries`, in ranked order.
    ///
    /// Returns the new generation.
    pub fn replace_all(&mut self, entries: &[FrequencyEntry]) -> u64 {
        let mut fresh: Vec<DisplayItem> = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = self.allocate_id();
            fresh.push(DisplayItem::new(id, entry.word.as_str(), entry.count, ItemOrigin::Ranked));
        }

        match self.mode {
            ViewMode::Cloud => {
                let mut placed: Vec<Rect> = Vec::with_capacity(fresh.len());
                for item in &mut fresh {
                    let footprint = self.config.labels.footprint(&item.label, item.count);
                    let spot = place(
                        footprint,
                        &placed,
                        self.bounds,
                        &self.exclusions,
                        &self.config.placement,
                        &mut self.rng,
                    );
                    item.rect = spot.rect(footprint);
                    placed.push(item.rect);
                }
            }
            ViewMode::Histogram => {
                layout_bars(&mut fresh, &self.config.histogram, self.bounds);
            }
        }
        rescale_items(&mut fresh, &self.config.histogram, self.bounds);

        self.items = fresh;
        self.generation += 1;
        tracing::debug!(
            items = self.items.len(),
            generation = self.generation,
            mode = ?self.mode,
            "replaced collection"
        );
        self.generation
    }

    /// Drop every item. Returns the new generation.
    pub fn clear(&mut self) -> u64 {
        self.items.clear();
        self.generation += 1;
        self.generation
    }

    // ------------------------------------------------------------------
    // Single-item operations
    // ------------------------------------------------------------------

    /// Show `word` with `count` occurrences as the result of a search.
    ///
    /// An automatic item already showing `word` is moved to its sorted
    /// position instead of duplicated; a pinned one stays put, and one held
    /// by a pointer only has its count refreshed.
    pub fn insert_searched(&mut self, word: &str, count: usize, found: bool) -> SearchPlacement {
        let origin = ItemOrigin::Searched { found };

        let existing = self
            .items
            .iter()
            .position(|item| !item.is_deleting() && item.label == word);
        let (placement, mut item) = match existing {
            Some(index) if self.items[index].pinned => {
                return SearchPlacement::Pinned(self.items[index].id);
            }
            Some(index) if self.items[index].is_held() => {
                let held = &mut self.items[index];
                held.count = count;
                held.origin = origin;
                let id = held.id;
                self.rescale();
                return SearchPlacement::Held(id);
            }
            Some(index) => {
                let mut item = self.items.remove(index);
                item.count = count;
                item.origin = origin;
                (SearchPlacement::Repositioned(item.id), item)
            }
            None => {
                let id = self.allocate_id();
                (SearchPlacement::Inserted(id), DisplayItem::new(id, word, count, origin))
            }
        };

        if self.mode == ViewMode::Cloud {
            let footprint = self.config.labels.footprint(&item.label, item.count);
            let occupied = self.live_rects(None);
            let spot = place(
                footprint,
                &occupied,
                self.bounds,
                &self.exclusions,
                &self.config.placement,
                &mut self.rng,
            );
            item.rect = spot.rect(footprint);
        }

        let index = self.sorted_index(count);
        self.items.insert(index, item);
        self.reflow();
        self.rescale();
        placement
    }

    /// Begin the fade-out of `id`. Returns `false` when the item is gone or
    /// already deleting.
    pub fn mark_deleting(&mut self, id: ItemId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::trace!(item = %id, "mark_deleting on missing item");
            return false;
        };
        if item.is_deleting() {
            return false;
        }
        item.state = ItemState::Deleting;
        self.rescale();
        true
    }

    /// Physically remove `id`, then reflow and rescale the rest.
    pub fn remove(&mut self, id: ItemId) -> Option<DisplayItem> {
        let Some(index) = self.position(id) else {
            tracing::trace!(item = %id, "remove on missing item");
            return None;
        };
        let removed = self.items.remove(index);
        self.reflow();
        self.rescale();
        Some(removed)
    }

    /// Move `id` back into sequence by its horizontal center: before the
    /// first non-pinned sibling whose center lies further right, otherwise
    /// after the last non-pinned sibling. Returns the new index.
    pub fn reorder(&mut self, id: ItemId) -> Option<usize> {
        let index = self.position(id)?;
        if self.items[index].is_deleting() {
            return None;
        }
        let item = self.items.remove(index);
        let center = item.rect.center_x();

        let mut target = None;
        let mut last_automatic = None;
        for (i, sibling) in self.items.iter().enumerate() {
            if sibling.pinned || sibling.is_held() {
                continue;
            }
            if sibling.rect.center_x() > center {
                target = Some(i);
                break;
            }
            last_automatic = Some(i);
        }
        let target = target.unwrap_or_else(|| last_automatic.map_or(self.items.len(), |i| i + 1));

        self.items.insert(target, item);
        self.reflow();
        Some(target)
    }

    /// Mark `id` as manually placed and keep it inside the stage.
    pub fn pin(&mut self, id: ItemId) -> bool {
        let bounds = self.bounds;
        match self.live_mut(id) {
            Some(item) => {
                item.pinned = true;
                item.rect = item.rect.clamped_within(bounds);
                true
            }
            None => false,
        }
    }

    /// Move `id` so its top-left corner is at `origin`, clamped to the
    /// stage.
    pub fn drag_to(&mut self, id: ItemId, origin: Point) -> bool {
        let bounds = self.bounds;
        match self.live_mut(id) {
            Some(item) => {
                item.rect = Rect::at(origin, item.rect.size()).clamped_within(bounds);
                true
            }
            None => false,
        }
    }

    /// Flag `id` as held by a pointer.
    pub fn begin_drag(&mut self, id: ItemId) -> bool {
        self.set_live_state(id, ItemState::Dragging)
    }

    /// Return `id` to its resting state.
    pub fn end_drag(&mut self, id: ItemId) -> bool {
        self.set_live_state(id, ItemState::Normal)
    }

    // ------------------------------------------------------------------
    // Layout maintenance
    // ------------------------------------------------------------------

    /// Recompute automatic positions.
    ///
    /// Cloud mode keeps each label where it is and only re-sizes it and
    /// clamps it into the stage. Histogram mode lays non-pinned bars into
    /// consecutive slots in Collection order. Deleting bars and bars held by
    /// a pointer keep their rect but still occupy their slot.
    pub fn reflow(&mut self) {
        match self.mode {
            ViewMode::Cloud => {
                let bounds = self.bounds;
                for item in self.items.iter_mut().filter(|item| item.is_automatic() && !item.is_held()) {
                    let footprint = self.config.labels.footprint(&item.label, item.count);
                    item.rect = Rect::at(item.rect.origin(), footprint).clamped_within(bounds);
                }
            }
            ViewMode::Histogram => layout_bars(&mut self.items, &self.config.histogram, self.bounds),
        }
    }

    /// Recompute every live fill relative to the current maximum count.
    pub fn rescale(&mut self) {
        rescale_items(&mut self.items, &self.config.histogram, self.bounds);
    }

    /// Resize the stage, then reflow and rescale.
    pub fn set_bounds(&mut self, bounds: Size) -> Result<(), LayoutError> {
        self.bounds = Size::checked(bounds.width, bounds.height).map_err(LayoutError::InvalidBounds)?;
        self.reflow();
        self.rescale();
        Ok(())
    }

    /// Reserve regions (toolbars, panels) that cloud placement must avoid.
    pub fn set_exclusions(&mut self, zones: Vec<Rect>) {
        self.exclusions = zones;
    }

    /// Switch arrangement, re-laying every non-pinned live item.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        match mode {
            ViewMode::Cloud => {
                let mut occupied: Vec<Rect> = self
                    .items
                    .iter()
                    .filter(|item| !item.is_automatic())
                    .map(|item| item.rect)
                    .collect();
                for item in self.items.iter_mut().filter(|item| item.is_automatic()) {
                    let footprint = self.config.labels.footprint(&item.label, item.count);
                    let spot = place(
                        footprint,
                        &occupied,
                        self.bounds,
                        &self.exclusions,
                        &self.config.placement,
                        &mut self.rng,
                    );
                    item.rect = spot.rect(footprint);
                    occupied.push(item.rect);
                }
            }
            ViewMode::Histogram => layout_bars(&mut self.items, &self.config.histogram, self.bounds),
        }
        self.rescale();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn live_mut(&mut self, id: ItemId) -> Option<&mut DisplayItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id && !item.is_deleting());
        if item.is_none() {
            tracing::trace!(item = %id, "ignored mutation of missing or deleting item");
        }
        item
    }

    fn set_live_state(&mut self, id: ItemId, state: ItemState) -> bool {
        match self.live_mut(id) {
            Some(item) => {
                item.state = state;
                true
            }
            None => false,
        }
    }

    /// Rects of live items, optionally skipping one.
    fn live_rects(&self, skip: Option<ItemId>) -> Vec<Rect> {
        self.items
            .iter()
            .filter(|item| !item.is_deleting() && Some(item.id) != skip)
            .map(|item| item.rect)
            .collect()
    }

    /// Insertion index for an automatic item showing `count`: before the
    /// first non-pinned item with a lower count, else after the last
    /// non-pinned item. Equal counts keep arrival order.
    fn sorted_index(&self, count: usize) -> usize {
        let mut last_automatic = None;
        for (i, item) in self.items.iter().enumerate() {
            if item.pinned {
                continue;
            }
            if item.count < count {
                return i;
            }
            last_automatic = Some(i);
        }
        last_automatic.map_or(self.items.len(), |i| i + 1)
    }
}

fn layout_bars(items: &mut [DisplayItem], config: &HistogramConfig, bounds: Size) {
    let bars = items.iter().filter(|item| !item.pinned).count();
    let geometry = config.geometry(bars, bounds);
    let size = Size::new(geometry.bar_width, geometry.bar_height);
    for (slot, item) in items.iter_mut().filter(|item| !item.pinned).enumerate() {
        if item.is_deleting() || item.is_held() {
            continue;
        }
        item.rect = Rect::at(config.slot_origin(&geometry, slot), size);
    }
}

fn rescale_items(items: &mut [DisplayItem], config: &HistogramConfig, bounds: Size) {
    let max_count = items
        .iter()
        .filter(|item| !item.is_deleting())
        .map(|item| item.count)
        .max()
        .unwrap_or(0)
        .max(1);
    let bars = items.iter().filter(|item| !item.pinned).count();
    let geometry = config.geometry(bars, bounds);
    for item in items.iter_mut().filter(|item| !item.is_deleting()) {
        item.fill_height = config
            .fill_height(item.count, max_count, &geometry)
            .min(item.rect.height.max(0.0));
    }
}
