#![forbid(unsafe_code)]

//! The interaction session: one analysed text, its stage, and the gestures
//! and timers acting on it.
//!
//! [`Session`] is the only entry point a host needs. It runs the analysis
//! pipeline, routes pointer events through the gesture recognizer, applies
//! the resulting gestures to the [`Stage`], and reports what changed as
//! [`InteractionEffect`]s for the host to animate.
//!
//! # Time
//!
//! The session never reads the clock. Every call that depends on time takes
//! `now`, and the host calls [`Session::tick`] at least at
//! [`Session::next_deadline`] to resolve single clicks and finish pending
//! removals.
//!
//! # Invariants
//!
//! 1. `analyze` and `clear` cancel every pending removal and gesture before
//!    touching the stage; nothing armed against the previous Collection can
//!    fire against the new one.
//! 2. A removal that does fire is checked against the current generation
//!    and the Collection; a stale one is a traced no-op.
//! 3. Drags are tracked per pointer. Two simultaneous drags never see each
//!    other's anchors.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Pointer event for an unknown pointer | Ignored |
//! | Gesture on an item removed meanwhile | Ignored, traced |
//! | Capture release rejected by the host | Logged at debug |
//! | Negative top N | [`TextError::NegativeTopN`] |

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use web_time::Instant;
use wordfall_core::geometry::{Point, Rect, Size};
use wordfall_core::gesture::{DragMode, GestureEvent, GestureRecognizer, ItemId, PressTarget};
use wordfall_core::pointer::{PointerEvent, PointerId, PointerPhase};
use wordfall_layout::{DisplayItem, LayoutError, SearchPlacement, Stage, ViewMode};
use wordfall_text::{FrequencyEntry, FrequencyTable, SearchOutcome, TextError, TopN, normalize_token};

use crate::burst::FrequencyBurst;
use crate::capture::{self, PointerCapture};
use crate::config::{ConfigError, EngineConfig};
use crate::scheduler::RemovalScheduler;

/// Errors from building a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    /// Ranked words now on stage, best first.
    pub entries: Vec<FrequencyEntry>,
    /// Distinct words that survived filtering.
    pub unique: usize,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// What happened on stage; `None` when nothing was searched.
    pub placement: Option<SearchPlacement>,
}

/// Something the host should show.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEffect {
    /// An item was picked up.
    DragStarted { item: ItemId, mode: DragMode },
    /// A dragged item moved; `origin` is its new top-left corner.
    Moved { item: ItemId, origin: Point },
    /// A free drag ended; the item now stays where it was dropped.
    Pinned { item: ItemId },
    /// A reorder drag ended; the item now sits at `index`.
    Reordered { item: ItemId, index: usize },
    /// A drag was abandoned and the item returned to its start.
    DragCancelled { item: ItemId },
    /// A single click resolved. Cloud labels carry a drop burst.
    Clicked { item: ItemId, burst: Option<FrequencyBurst> },
    /// A double click started the item's fade-out; it goes at `due`.
    DeleteArmed { item: ItemId, due: Instant },
    /// A faded item left the Collection.
    Removed { item: ItemId },
}

/// Where a dragged item started.
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    item: ItemId,
    press: Point,
    origin: Point,
}

/// One analysed text and everything acting on it.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    stage: Stage,
    gestures: GestureRecognizer,
    removals: RemovalScheduler,
    table: FrequencyTable,
    ranked: Vec<FrequencyEntry>,
    unique: usize,
    drags: FxHashMap<PointerId, DragAnchor>,
    captured: FxHashSet<PointerId>,
}

impl Session {
    /// Build a session on an empty stage of `bounds`.
    pub fn new(config: EngineConfig, bounds: Size) -> Result<Self, SessionError> {
        let config = config.validated()?;
        let stage = Stage::new(config.to_stage_config(), bounds, config.seed)?;
        let gestures = GestureRecognizer::new(config.to_gesture_config());
        Ok(Self {
            config,
            stage,
            gestures,
            removals: RemovalScheduler::new(),
            table: FrequencyTable::default(),
            ranked: Vec::new(),
            unique: 0,
            drags: FxHashMap::default(),
            captured: FxHashSet::default(),
        })
    }

    // ------------------------------------------------------------------
    // Analysis and search
    // ------------------------------------------------------------------

    /// Tokenize, rank and lay out `text`, replacing the whole Collection.
    ///
    /// `top_n` is capped at the configured maximum; zero means 1.
    pub fn analyze(&mut self, text: &str, top_n: i64, exclude_stopwords: bool) -> Result<Analysis, TextError> {
        let top_n = TopN::clamped(top_n, self.config.ranking.max_top_n)?;
        let table = FrequencyTable::from_text(text);
        let entries = table.top(top_n, exclude_stopwords);
        let unique = table.unique(exclude_stopwords);

        self.cancel_interactions();
        self.stage.replace_all(&entries);
        self.table = table;
        self.ranked = entries.clone();
        self.unique = unique;

        tracing::debug!(
            tokens = self.table.total_tokens(),
            unique,
            shown = entries.len(),
            top_n = top_n.get(),
            "analysis complete"
        );
        Ok(Analysis { entries, unique })
    }

    /// Analyse with the configured default top N and stopword setting.
    pub fn analyze_default(&mut self, text: &str) -> Result<Analysis, TextError> {
        let top_n = i64::try_from(self.config.ranking.default_top_n).unwrap_or(i64::MAX);
        let exclude = self.config.ranking.exclude_stopwords;
        self.analyze(text, top_n, exclude)
    }

    /// Forget the text and empty the stage.
    pub fn clear(&mut self) {
        self.cancel_interactions();
        self.stage.clear();
        self.table = FrequencyTable::default();
        self.ranked.clear();
        self.unique = 0;
    }

    /// Look up `query` and show it on stage. Words that do not occur are
    /// shown too, with count 0.
    pub fn search(&mut self, query: &str) -> SearchReport {
        let outcome = wordfall_text::search(&self.table, query);
        let placement = match &outcome {
            SearchOutcome::Found(hit) => Some(self.stage.insert_searched(&hit.query, hit.count, true)),
            SearchOutcome::NotFound(hit) => Some(self.stage.insert_searched(&hit.query, hit.count, false)),
            SearchOutcome::EmptyText | SearchOutcome::EmptyQuery => None,
        };
        SearchReport { outcome, placement }
    }

    /// The live item showing `word`, for highlighting from a ranked list.
    #[must_use]
    pub fn highlight(&self, word: &str) -> Option<ItemId> {
        let normalized = normalize_token(word);
        self.stage.find_label(&normalized).map(|item| item.id)
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Feed one pointer event.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        capture: &mut impl PointerCapture,
    ) -> Vec<InteractionEffect> {
        let target = match event.phase {
            PointerPhase::Down => self.press_target(event.position),
            _ => None,
        };
        if target.is_some() {
            self.captured.insert(event.pointer);
        }

        let gestures = self.gestures.process(event, target, now);
        let mut effects = Vec::with_capacity(gestures.len());
        for gesture in gestures {
            self.apply(gesture, now, &mut effects);
        }

        if matches!(event.phase, PointerPhase::Up | PointerPhase::Cancel)
            && self.captured.remove(&event.pointer)
        {
            capture::release(capture, event.pointer);
        }
        effects
    }

    /// Resolve expired clicks and finish due removals.
    pub fn tick(&mut self, now: Instant) -> Vec<InteractionEffect> {
        let mut effects = Vec::new();
        for gesture in self.gestures.poll(now) {
            self.apply(gesture, now, &mut effects);
        }

        for entry in self.removals.take_due(now) {
            if entry.generation != self.stage.generation() {
                tracing::trace!(item = %entry.item, "stale removal from an earlier generation ignored");
                continue;
            }
            match self.stage.remove(entry.item) {
                Some(_) => effects.push(InteractionEffect::Removed { item: entry.item }),
                None => tracing::trace!(item = %entry.item, "removal of missing item ignored"),
            }
        }
        effects
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.gestures.next_deadline(), self.removals.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ------------------------------------------------------------------
    // Stage passthrough
    // ------------------------------------------------------------------

    /// Switch arrangement. In-flight drags are abandoned.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.stage.mode() == mode {
            return;
        }
        self.abandon_drags();
        self.gestures.reset();
        self.stage.set_view_mode(mode);
    }

    /// Resize the stage.
    pub fn resize(&mut self, bounds: Size) -> Result<(), LayoutError> {
        self.stage.set_bounds(bounds)
    }

    /// Reserve regions that cloud placement must avoid.
    pub fn set_exclusions(&mut self, zones: Vec<Rect>) {
        self.stage.set_exclusions(zones);
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        self.stage.items()
    }

    /// Owned copy of the Collection for rendering or export.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DisplayItem> {
        self.stage.snapshot()
    }

    /// The latest ranking, for a side list.
    #[inline]
    #[must_use]
    pub fn ranked(&self) -> &[FrequencyEntry] {
        &self.ranked
    }

    #[inline]
    #[must_use]
    pub fn unique(&self) -> usize {
        self.unique
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Removals still waiting for their grace period.
    #[inline]
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn press_target(&self, at: Point) -> Option<PressTarget> {
        let id = self.stage.hit_test(at)?;
        let item = self.stage.get(id)?;
        let reorderable = self.stage.mode() == ViewMode::Histogram && !item.pinned;
        Some(PressTarget::new(id, reorderable))
    }

    fn apply(&mut self, gesture: GestureEvent, now: Instant, effects: &mut Vec<InteractionEffect>) {
        match gesture {
            GestureEvent::DragStart {
                pointer,
                item,
                mode,
                origin,
            } => {
                let Some(start) = self.stage.get(item).map(|it| it.rect.origin()) else {
                    tracing::trace!(item = %item, "drag start on missing item ignored");
                    return;
                };
                if self.stage.begin_drag(item) {
                    self.drags.insert(
                        pointer,
                        DragAnchor {
                            item,
                            press: origin,
                            origin: start,
                        },
                    );
                    effects.push(InteractionEffect::DragStarted { item, mode });
                }
            }
            GestureEvent::DragMove {
                pointer,
                item,
                mode,
                current,
                ..
            } => {
                let Some(anchor) = self.drags.get(&pointer).copied() else {
                    return;
                };
                let (dx, dy) = current.delta_from(anchor.press);
                let target = match mode {
                    DragMode::Free => Point::new(anchor.origin.x + dx, anchor.origin.y + dy),
                    DragMode::Reorder => Point::new(anchor.origin.x + dx, anchor.origin.y),
                };
                if self.stage.drag_to(item, target)
                    && let Some(moved) = self.stage.get(item)
                {
                    effects.push(InteractionEffect::Moved {
                        item,
                        origin: moved.rect.origin(),
                    });
                }
            }
            GestureEvent::DragEnd {
                pointer, item, mode, ..
            } => {
                if self.drags.remove(&pointer).is_none() || !self.stage.end_drag(item) {
                    tracing::trace!(item = %item, "drag end on missing item ignored");
                    return;
                }
                match mode {
                    DragMode::Free => {
                        if self.stage.pin(item) {
                            effects.push(InteractionEffect::Pinned { item });
                        }
                    }
                    DragMode::Reorder => {
                        if let Some(index) = self.stage.reorder(item) {
                            effects.push(InteractionEffect::Reordered { item, index });
                        }
                    }
                }
            }
            GestureEvent::DragCancel { pointer, item } => {
                if let Some(anchor) = self.drags.remove(&pointer) {
                    self.stage.drag_to(item, anchor.origin);
                    if self.stage.end_drag(item) {
                        // Other bars may have moved while this one was held.
                        self.stage.reflow();
                        effects.push(InteractionEffect::DragCancelled { item });
                    }
                }
            }
            GestureEvent::Click { item, .. } => {
                let Some(shown) = self.stage.get(item).filter(|it| !it.is_deleting()) else {
                    tracing::trace!(item = %item, "click on missing item ignored");
                    return;
                };
                let burst = match self.stage.mode() {
                    ViewMode::Cloud => Some(FrequencyBurst::new(item, shown.count)),
                    ViewMode::Histogram => None,
                };
                effects.push(InteractionEffect::Clicked { item, burst });
            }
            GestureEvent::DoubleClick { item, .. } => {
                if !self.stage.mark_deleting(item) {
                    return;
                }
                for pointer in self.gestures.forget_item(item) {
                    self.drags.remove(&pointer);
                }
                let due = now + self.config.grace_period();
                self.removals.schedule(item, due, self.stage.generation());
                effects.push(InteractionEffect::DeleteArmed { item, due });
            }
        }
    }

    fn abandon_drags(&mut self) {
        for (_, anchor) in self.drags.drain() {
            self.stage.drag_to(anchor.item, anchor.origin);
            self.stage.end_drag(anchor.item);
        }
        self.stage.reflow();
    }

    fn cancel_interactions(&mut self) {
        let dropped = self.removals.cancel_all();
        if dropped > 0 {
            tracing::trace!(dropped, "cancelled pending removals");
        }
        self.gestures.reset();
        self.drags.clear();
    }
}
