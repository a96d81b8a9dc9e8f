#![forbid(unsafe_code)]

//! Gesture recognition: turns pointer sessions on stage items into clicks,
//! double-clicks and drags.
//!
//! [`GestureRecognizer`] is a stateful processor fed with [`PointerEvent`]s.
//! The caller hit-tests `Down` events against the stage and passes the item
//! under the pointer as a [`PressTarget`]; every later event of the same
//! pointer is attributed to that item.
//!
//! # State Machine
//!
//! Each pointer runs its own session:
//!
//! ```text
//! idle ──down──▶ pressed ──move > threshold──▶ dragging(free | reorder) ──up──▶ idle
//!                   │                                                      (DragEnd)
//!                   └──up──▶ idle (click armed, or DoubleClick if one was armed)
//! ```
//!
//! A released press does not emit `Click` immediately. It arms a pending
//! click for the item; a second release on the same item inside the
//! double-click window emits `DoubleClick` and disarms it, otherwise
//! [`poll`](GestureRecognizer::poll) emits the `Click` once the window has
//! elapsed.
//!
//! # Invariants
//!
//! 1. A session emits either a drag sequence or a click contribution, never
//!    both. If the threshold is crossed, release produces `DragEnd`.
//! 2. A pending click resolves exactly once: to `Click` (via `poll`) or to
//!    `DoubleClick` (via a second release).
//! 3. Drag sequences are well-formed: `DragStart` → `DragMove`* →
//!    `DragEnd | DragCancel`.
//! 4. The drag mode is decided once, when the threshold is crossed, and does
//!    not change for the rest of the session.
//! 5. Sessions are keyed by [`PointerId`]; two contacts never share state,
//!    and an item held by one pointer ignores presses from another.
//!
//! # Failure Modes
//!
//! - `Move`/`Up` for a pointer with no session (lost `Down`) are no-ops.
//! - A `Down` for a pointer that still has a session (lost `Up`) replaces
//!   the stale session, emitting `DragCancel` if it was dragging.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use crate::geometry::Point;
use crate::pointer::{PointerEvent, PointerId, PointerPhase};

/// Stable identifier of a stage item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and timeouts for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Per-axis movement (px) that must be exceeded before a press becomes
    /// a drag (default: 5).
    pub drag_threshold: f32,
    /// Time window between two releases on the same item for a double-click
    /// (default: 300ms).
    pub double_click_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            double_click_window: Duration::from_millis(300),
        }
    }
}

// ---------------------------------------------------------------------------
// Public event types
// ---------------------------------------------------------------------------

/// How a drag moves its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Item follows the pointer on both axes and is pinned on release.
    Free,
    /// Item slides horizontally and snaps into sequence on release.
    Reorder,
}

/// The item a `Down` event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressTarget {
    pub item: ItemId,
    /// Whether a horizontal drag should reorder (histogram bars in sequence).
    pub reorderable: bool,
}

impl PressTarget {
    #[must_use]
    pub const fn new(item: ItemId, reorderable: bool) -> Self {
        Self { item, reorderable }
    }
}

/// Semantic gesture events.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Pointer moved past the drag threshold.
    DragStart {
        pointer: PointerId,
        item: ItemId,
        mode: DragMode,
        /// Where the press started.
        origin: Point,
    },
    /// Ongoing drag movement.
    DragMove {
        pointer: PointerId,
        item: ItemId,
        mode: DragMode,
        current: Point,
        /// Movement since the previous event of this pointer (dx, dy).
        delta: (f32, f32),
    },
    /// Drag released.
    DragEnd {
        pointer: PointerId,
        item: ItemId,
        mode: DragMode,
        start: Point,
        end: Point,
    },
    /// Drag abandoned (pointer cancelled or superseded).
    DragCancel { pointer: PointerId, item: ItemId },
    /// A single click whose double-click window elapsed.
    Click { item: ItemId, pos: Point },
    /// Two releases on the same item within the double-click window.
    DoubleClick { item: ItemId, pos: Point },
}

impl GestureEvent {
    /// The item this event refers to.
    #[must_use]
    pub fn item(&self) -> ItemId {
        match self {
            Self::DragStart { item, .. }
            | Self::DragMove { item, .. }
            | Self::DragEnd { item, .. }
            | Self::DragCancel { item, .. }
            | Self::Click { item, .. }
            | Self::DoubleClick { item, .. } => *item,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Tracks one pointer from press to release.
#[derive(Debug, Clone)]
struct PointerSession {
    item: ItemId,
    reorderable: bool,
    start: Point,
    last: Point,
    drag: Option<DragMode>,
}

/// A released press waiting for a possible second click.
#[derive(Debug, Clone, Copy)]
struct PendingClick {
    pos: Point,
    released_at: Instant,
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Stateful gesture recognizer for pointer sessions on stage items.
///
/// Call [`process`](GestureRecognizer::process) for each pointer event and
/// [`poll`](GestureRecognizer::poll) on every tick to resolve single clicks.
pub struct GestureRecognizer {
    config: GestureConfig,
    sessions: FxHashMap<PointerId, PointerSession>,
    // Ordered so that simultaneous expiries resolve deterministically.
    pending: BTreeMap<ItemId, PendingClick>,
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("sessions", &self.sessions.len())
            .field("pending_clicks", &self.pending.len())
            .finish()
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// Create a new gesture recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            sessions: FxHashMap::default(),
            pending: BTreeMap::new(),
        }
    }

    /// Process a pointer event, returning any gesture events produced.
    ///
    /// `target` is only consulted for `Down` events; pass the hit-tested
    /// item, or `None` when the press landed on empty stage.
    pub fn process(
        &mut self,
        event: &PointerEvent,
        target: Option<PressTarget>,
        now: Instant,
    ) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);
        match event.phase {
            PointerPhase::Down => self.on_down(event.pointer, event.position, target, &mut out),
            PointerPhase::Move => self.on_move(event.pointer, event.position, &mut out),
            PointerPhase::Up => self.on_up(event.pointer, event.position, now, &mut out),
            PointerPhase::Cancel => self.on_cancel(event.pointer, &mut out),
        }
        out
    }

    /// Resolve pending clicks whose double-click window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        let window = self.config.double_click_window;
        let expired: Vec<ItemId> = self
            .pending
            .iter()
            .filter(|(_, click)| now.saturating_duration_since(click.released_at) > window)
            .map(|(item, _)| *item)
            .collect();

        let mut out = Vec::with_capacity(expired.len());
        for item in expired {
            if let Some(click) = self.pending.remove(&item) {
                out.push(GestureEvent::Click {
                    item,
                    pos: click.pos,
                });
            }
        }
        out
    }

    /// Earliest instant at which [`poll`](Self::poll) will emit a click.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .values()
            .map(|click| click.released_at + self.config.double_click_window)
            .min()
    }

    /// Whether `pointer` is currently dragging.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self, pointer: PointerId) -> bool {
        self.sessions
            .get(&pointer)
            .is_some_and(|s| s.drag.is_some())
    }

    /// The pointer currently holding `item`, if any.
    #[must_use]
    pub fn holder_of(&self, item: ItemId) -> Option<PointerId> {
        self.sessions
            .iter()
            .find(|(_, s)| s.item == item)
            .map(|(pointer, _)| *pointer)
    }

    /// Number of pointers currently pressed on an item.
    #[inline]
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Whether `item` has a click waiting for its double-click window.
    #[inline]
    #[must_use]
    pub fn has_pending_click(&self, item: ItemId) -> bool {
        self.pending.contains_key(&item)
    }

    /// Drop all sessions and pending clicks that reference `item`.
    ///
    /// Returns the pointers whose sessions were dropped.
    pub fn forget_item(&mut self, item: ItemId) -> Vec<PointerId> {
        self.pending.remove(&item);
        let dropped: Vec<PointerId> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.item == item)
            .map(|(pointer, _)| *pointer)
            .collect();
        for pointer in &dropped {
            self.sessions.remove(pointer);
        }
        dropped
    }

    /// Reset all gesture state to idle.
    pub fn reset(&mut self) {
        self.sessions.clear();
        self.pending.clear();
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureRecognizer {
    fn on_down(
        &mut self,
        pointer: PointerId,
        pos: Point,
        target: Option<PressTarget>,
        out: &mut Vec<GestureEvent>,
    ) {
        if let Some(stale) = self.sessions.remove(&pointer) {
            crate::trace!(pointer = pointer.0, "replacing stale pointer session");
            if stale.drag.is_some() {
                out.push(GestureEvent::DragCancel {
                    pointer,
                    item: stale.item,
                });
            }
        }

        let Some(target) = target else {
            return;
        };

        if self.holder_of(target.item).is_some() {
            crate::trace!(
                pointer = pointer.0,
                item = target.item.0,
                "item already held by another pointer"
            );
            return;
        }

        self.sessions.insert(
            pointer,
            PointerSession {
                item: target.item,
                reorderable: target.reorderable,
                start: pos,
                last: pos,
                drag: None,
            },
        );
    }

    fn on_move(&mut self, pointer: PointerId, pos: Point, out: &mut Vec<GestureEvent>) {
        let threshold = self.config.drag_threshold;
        let Some(session) = self.sessions.get_mut(&pointer) else {
            return;
        };

        if session.drag.is_none() {
            let (dx, dy) = pos.delta_from(session.start);
            if dx.abs() > threshold || dy.abs() > threshold {
                let mode = if session.reorderable && dx.abs() > dy.abs() {
                    DragMode::Reorder
                } else {
                    DragMode::Free
                };
                session.drag = Some(mode);
                self.pending.remove(&session.item);
                out.push(GestureEvent::DragStart {
                    pointer,
                    item: session.item,
                    mode,
                    origin: session.start,
                });
            }
        }

        if let Some(mode) = session.drag {
            out.push(GestureEvent::DragMove {
                pointer,
                item: session.item,
                mode,
                current: pos,
                delta: pos.delta_from(session.last),
            });
        }

        session.last = pos;
    }

    fn on_up(&mut self, pointer: PointerId, pos: Point, now: Instant, out: &mut Vec<GestureEvent>) {
        let Some(session) = self.sessions.remove(&pointer) else {
            crate::trace!(pointer = pointer.0, "release without press ignored");
            return;
        };

        if let Some(mode) = session.drag {
            out.push(GestureEvent::DragEnd {
                pointer,
                item: session.item,
                mode,
                start: session.start,
                end: pos,
            });
            return;
        }

        let window = self.config.double_click_window;
        match self.pending.remove(&session.item) {
            Some(first) if now.saturating_duration_since(first.released_at) <= window => {
                out.push(GestureEvent::DoubleClick {
                    item: session.item,
                    pos,
                });
            }
            expired => {
                // A first click that was never polled still resolves as a click.
                if let Some(first) = expired {
                    out.push(GestureEvent::Click {
                        item: session.item,
                        pos: first.pos,
                    });
                }
                self.pending.insert(
                    session.item,
                    PendingClick {
                        pos,
                        released_at: now,
                    },
                );
            }
        }
    }

    fn on_cancel(&mut self, pointer: PointerId, out: &mut Vec<GestureEvent>) {
        if let Some(session) = self.sessions.remove(&pointer)
            && session.drag.is_some()
        {
            out.push(GestureEvent::DragCancel {
                pointer,
                item: session.item,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
