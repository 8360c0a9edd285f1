#![forbid(unsafe_code)]

//! Scroll-synchronized tab activation.
//!
//! [`ScrollSync`] owns the page's navigation state: which category is
//! content-active under the current scroll position, whether a tab click
//! has locked the visual highlight away from it, and whether the detail
//! sheet has suspended tracking altogether.
//!
//! # Algorithm
//!
//! Content activation scans the fixed category sequence against a single
//! threshold line `scroll_y + sticky_offset + switch_offset` (document
//! coordinates):
//!
//! - **Top guard**: at or above the first section's effective top, the
//!   first category wins outright.
//! - **Bottom guard**: within `bottom_epsilon` of the document end, the
//!   last category wins (sections shorter than the viewport could never
//!   become active otherwise).
//! - **Normal case**: the first section in order whose bottom edge has not
//!   yet crossed the threshold, provided its top has. A section keeps its
//!   activation until its own bottom crosses the line, so boundary jitter
//!   cannot flash the next tab early.
//! - **Gap fallback**: if no span contains the threshold, the last section
//!   whose top is above it; failing that, the first category.
//!
//! # Invariants
//!
//! 1. The visually active id is always a member of the category sequence
//!    (the first id when nothing better is known), or absent only when the
//!    sequence is empty.
//! 2. While suspended, no scroll or resize event mutates either active id.
//! 3. At most one unlock path is armed at a time; arming a new lock
//!    episode replaces all prior deadlines wholesale.
//! 4. Recomputation is idempotent and, for a monotone scroll sequence over
//!    fixed geometry, never moves the active ordinal backwards.
//!
//! # Failure Modes
//!
//! All malformed input is a defensive no-op: unknown category ids are
//! ignored, ids with unmounted geometry are skipped in scans, and an empty
//! sequence turns every operation into a no-op. No method panics.

use crate::align::plan_strip_scroll;
use crate::clock::Timestamp;
use crate::geometry::GeometryProvider;
use crate::gesture::Gesture;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`ScrollSync`]. Distances in CSS pixels, times in
/// milliseconds.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Height of the sticky header the thresholds must clear.
    pub sticky_offset: f64,

    /// Lead-in distance below the sticky edge where activation switches.
    pub switch_offset: f64,

    /// Gap kept between the sticky edge and a section top after a
    /// tab-click scroll.
    pub click_scroll_gap: f64,

    /// Slack for the bottom-of-document guard.
    pub bottom_epsilon: f64,

    /// Breathing space left of a left-pinned tab in the strip.
    pub strip_edge_gap: f64,

    /// Unlock fallback when the host never reports a scroll-settled
    /// signal.
    pub unlock_fallback_ms: f64,

    /// Hard safety unlock after a tab-click scroll, independent of the
    /// fallback, so auto-highlight always resumes.
    pub unlock_safety_ms: f64,

    /// Delay before the strip is re-aligned a second time after a tab
    /// click, correcting for layout shift once the smooth scroll settles.
    pub realign_delay_ms: f64,

    /// Delay between suspension lifting and the single catch-up
    /// recomputation (matches the detail sheet's close animation).
    pub resume_delay_ms: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sticky_offset: 56.0,
            switch_offset: 50.0,
            click_scroll_gap: 6.0,
            bottom_epsilon: 20.0,
            strip_edge_gap: 8.0,
            unlock_fallback_ms: 650.0,
            unlock_safety_ms: 900.0,
            realign_delay_ms: 180.0,
            resume_delay_ms: 320.0,
        }
    }
}

impl SyncConfig {
    /// Set the sticky header height.
    #[must_use]
    pub fn with_sticky_offset(mut self, px: f64) -> Self {
        self.sticky_offset = px;
        self
    }

    /// Set the activation lead-in distance.
    #[must_use]
    pub fn with_switch_offset(mut self, px: f64) -> Self {
        self.switch_offset = px;
        self
    }

    /// Set the post-suspension catch-up delay.
    #[must_use]
    pub fn with_resume_delay_ms(mut self, ms: f64) -> Self {
        self.resume_delay_ms = ms;
        self
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A scroll side effect the host must perform (smoothly animated).
///
/// Commands are queued by the engine and drained with
/// [`ScrollSync::take_commands`]; the engine itself never scrolls
/// anything. The strip offset is mutated by no one else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncCommand {
    /// Scroll the document so its top sits at `top`.
    ScrollPageTo {
        /// Target document scroll offset, already clamped to `>= 0`.
        top: f64,
    },
    /// Scroll the tab strip to the given horizontal offset.
    ScrollStripTo {
        /// Target strip scroll offset, already clamped to the strip range.
        left: f64,
    },
}

/// Why a lock episode ended (diagnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockReason {
    /// A genuine user gesture arrived.
    Gesture(Gesture),
    /// The host reported the smooth scroll as settled.
    ScrollSettled,
    /// The fallback timer fired (no settle signal arrived).
    Fallback,
    /// The hard safety timer fired.
    Safety,
    /// Content scroll naturally reached the locked target.
    Arrival,
}

// ---------------------------------------------------------------------------
// Lock state
// ---------------------------------------------------------------------------

/// Explicit visual-override state. Exactly one unlock path is armed per
/// episode; a new click replaces the whole state.
#[derive(Debug, Clone, Copy)]
enum LockState {
    Unlocked,
    Locked {
        /// Index of the clicked category; overrides the content-active id
        /// for rendering.
        target: usize,
        /// Unlock when no settle signal has arrived by here.
        fallback_at: Timestamp,
        /// Unconditional unlock, guaranteeing auto-highlight resumes.
        safety_at: Timestamp,
    },
}

// ---------------------------------------------------------------------------
// ScrollSync
// ---------------------------------------------------------------------------

/// Scroll-sync engine, lock controller, and suspension gate for a fixed
/// ordered category sequence.
///
/// Host wiring: forward scroll/resize/gesture events as they arrive, call
/// [`on_frame`](ScrollSync::on_frame) once per animation frame (this is
/// where batched recomputation and deadlines run), and drain commands
/// afterwards.
#[derive(Debug)]
pub struct ScrollSync {
    config: SyncConfig,

    /// Fixed ordered category ids; immutable for the page's lifetime.
    ids: Vec<Box<str>>,

    /// Index of the content-active category (0 when nothing better is
    /// known).
    content_active: usize,

    lock: LockState,

    /// Pending second strip alignment after a tab click. Kept outside the
    /// lock state: an early unlock (fast settle signal, gesture) must not
    /// skip the pass that corrects for layout shift once the smooth
    /// scroll is over.
    realign_at: Option<Timestamp>,

    /// Detail-sheet gate; while set, scroll tracking is a no-op.
    suspended: bool,

    /// Pending catch-up recomputation after suspension lifts.
    resume_at: Option<Timestamp>,

    /// Recompute requested; serviced at most once per frame.
    dirty: bool,

    commands: Vec<SyncCommand>,

    /// Diagnostic: completed lock episodes.
    unlocks: u64,

    /// Diagnostic: why the last episode ended.
    last_unlock: Option<UnlockReason>,
}

impl ScrollSync {
    /// Create an engine for the given category sequence.
    ///
    /// The first id starts out active; an initial recomputation is already
    /// scheduled, so the first [`on_frame`](ScrollSync::on_frame) corrects
    /// the highlight for a restored scroll position.
    #[must_use]
    pub fn new<I, S>(ids: I, config: SyncConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        Self {
            config,
            ids: ids.into_iter().map(Into::into).collect(),
            content_active: 0,
            lock: LockState::Unlocked,
            realign_at: None,
            suspended: false,
            resume_at: None,
            dirty: true,
            commands: Vec::new(),
            unlocks: 0,
            last_unlock: None,
        }
    }

    /// The fixed category id sequence.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[Box<str>] {
        &self.ids
    }

    /// The id the tab strip should highlight: the lock target while
    /// locked, the content-active id otherwise. `None` only for an empty
    /// sequence.
    #[must_use]
    pub fn visual_active(&self) -> Option<&str> {
        let index = match self.lock {
            LockState::Locked { target, .. } => target,
            LockState::Unlocked => self.content_active,
        };
        self.ids.get(index).map(AsRef::as_ref)
    }

    /// The id the scroll position is currently inside of.
    #[must_use]
    pub fn content_active(&self) -> Option<&str> {
        self.ids.get(self.content_active).map(AsRef::as_ref)
    }

    /// Whether a tab click currently overrides the highlight.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.lock, LockState::Locked { .. })
    }

    /// Whether the detail sheet currently suspends tracking.
    ///
    /// Stays `true` until the post-close catch-up recomputation has been
    /// scheduled *and* its delay has elapsed.
    #[inline]
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Completed lock episodes (diagnostic).
    #[inline]
    #[must_use]
    pub fn unlock_count(&self) -> u64 {
        self.unlocks
    }

    /// Why the last lock episode ended (diagnostic).
    #[inline]
    #[must_use]
    pub fn last_unlock(&self) -> Option<UnlockReason> {
        self.last_unlock
    }

    /// Commands queued since the last drain.
    #[inline]
    #[must_use]
    pub fn pending_commands(&self) -> &[SyncCommand] {
        &self.commands
    }

    /// Drain queued scroll commands for the host to execute.
    #[must_use]
    pub fn take_commands(&mut self) -> Vec<SyncCommand> {
        std::mem::take(&mut self.commands)
    }

    // -----------------------------------------------------------------------
    // Event entry points
    // -----------------------------------------------------------------------

    /// The page scrolled. Cheap: only marks a recomputation as due; the
    /// work happens in the next [`on_frame`](ScrollSync::on_frame).
    pub fn on_scroll(&mut self) {
        if self.suspended {
            return;
        }
        self.dirty = true;
    }

    /// The viewport resized. Same batching as [`on_scroll`](ScrollSync::on_scroll).
    pub fn on_resize(&mut self) {
        if self.suspended {
            return;
        }
        self.dirty = true;
    }

    /// A genuine user gesture (wheel, touch move, navigation key). Releases
    /// an armed lock; otherwise inert, since plain scroll tracking is driven by
    /// [`on_scroll`](ScrollSync::on_scroll).
    pub fn on_gesture(&mut self, gesture: Gesture, geo: &dyn GeometryProvider) {
        if self.suspended {
            return;
        }
        if self.is_locked() {
            self.unlock(geo, UnlockReason::Gesture(gesture));
        }
    }

    /// The host's scroll-settled signal (`scrollend` where available).
    pub fn on_scroll_settled(&mut self, geo: &dyn GeometryProvider) {
        if self.suspended {
            return;
        }
        if self.is_locked() {
            self.unlock(geo, UnlockReason::ScrollSettled);
        }
    }

    /// A tab was clicked: lock the highlight to `id`, scroll the page to
    /// the section, and align the strip now and once more after
    /// `realign_delay_ms`.
    ///
    /// Unknown ids and clicks while suspended are ignored. A click during
    /// a pending lock episode replaces every armed deadline; only one
    /// unlock path exists at a time.
    pub fn on_tab_click(&mut self, id: &str, geo: &dyn GeometryProvider, now: Timestamp) {
        if self.suspended {
            return;
        }
        let Some(target) = self.index_of(id) else {
            crate::warn!(id, "tab click for unknown category id ignored");
            return;
        };

        self.lock = LockState::Locked {
            target,
            fallback_at: now.plus_millis(self.config.unlock_fallback_ms),
            safety_at: now.plus_millis(self.config.unlock_safety_ms),
        };
        self.realign_at = Some(now.plus_millis(self.config.realign_delay_ms));
        // The click supersedes any batched scroll recompute from this frame.
        self.dirty = false;

        let page = geo.page_metrics();
        if let Some(rect) = geo.section_rect(id) {
            let top = (rect.doc_top(page.scroll_y)
                - self.config.sticky_offset
                - self.config.click_scroll_gap)
                .max(0.0);
            self.commands.push(SyncCommand::ScrollPageTo { top });
        }
        self.align_strip(geo, target);
        crate::debug!(id, "tab click locked highlight");
    }

    /// Gate scroll tracking while the detail sheet is open.
    ///
    /// Opening cancels any armed lock episode outright (the sheet owns the
    /// screen). Closing keeps the gate effective for `resume_delay_ms`,
    /// then exactly one catch-up recomputation runs on the next frame.
    pub fn set_suspended(&mut self, suspended: bool, now: Timestamp) {
        if suspended {
            self.lock = LockState::Unlocked;
            self.realign_at = None;
            self.resume_at = None;
            self.dirty = false;
            self.suspended = true;
        } else if self.suspended {
            self.resume_at = Some(now.plus_millis(self.config.resume_delay_ms));
        }
    }

    /// Per-animation-frame driver: services the resume deadline, the lock
    /// deadlines, and at most one batched recomputation.
    pub fn on_frame(&mut self, geo: &dyn GeometryProvider, now: Timestamp) {
        if let Some(at) = self.resume_at
            && now.has_reached(at)
        {
            self.resume_at = None;
            self.suspended = false;
            self.dirty = true;
            crate::debug!("suspension lifted, catch-up recompute scheduled");
        }
        if self.suspended || self.ids.is_empty() {
            return;
        }

        if let Some(at) = self.realign_at
            && now.has_reached(at)
        {
            // Second alignment pass once the smooth scroll has settled the
            // layout. Targets the currently highlighted tab, so it stays
            // correct whether the lock is still armed or already released.
            self.realign_at = None;
            let index = match self.lock {
                LockState::Locked { target, .. } => target,
                LockState::Unlocked => self.content_active,
            };
            self.align_strip(geo, index);
        }

        if let LockState::Locked {
            fallback_at,
            safety_at,
            ..
        } = self.lock
        {
            if now.has_reached(safety_at) {
                self.unlock(geo, UnlockReason::Safety);
            } else if now.has_reached(fallback_at) {
                self.unlock(geo, UnlockReason::Fallback);
            }
        }

        if self.dirty {
            self.dirty = false;
            self.apply_recompute(geo);
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known.as_ref() == id)
    }

    /// Release the lock and immediately re-derive the highlight, so the
    /// displayed tab matches the settled scroll position without waiting
    /// for the next scroll event. Fires at most once per episode.
    fn unlock(&mut self, geo: &dyn GeometryProvider, reason: UnlockReason) {
        if !self.is_locked() {
            return;
        }
        self.lock = LockState::Unlocked;
        self.unlocks += 1;
        self.last_unlock = Some(reason);
        self.dirty = false;
        crate::debug!(?reason, "lock released");
        self.apply_recompute(geo);
    }

    /// Recompute the content-active id and propagate the result: align the
    /// strip on a change while unlocked; release the lock on natural
    /// arrival at the target.
    fn apply_recompute(&mut self, geo: &dyn GeometryProvider) {
        if self.ids.is_empty() {
            return;
        }
        let next = self.compute_content_active(geo);
        let changed = next != self.content_active;
        self.content_active = next;

        match self.lock {
            LockState::Unlocked => {
                if changed {
                    crate::debug!(active = self.ids[next].as_ref(), "content-active changed");
                    self.align_strip(geo, next);
                }
            }
            LockState::Locked { target, .. } => {
                if next == target {
                    self.lock = LockState::Unlocked;
                    self.unlocks += 1;
                    self.last_unlock = Some(UnlockReason::Arrival);
                    crate::debug!("scroll arrived at lock target, lock released");
                }
            }
        }
    }

    /// The activation scan described in the module docs. Pure in the
    /// engine state except for `content_active` being the fallback of last
    /// resort, which keeps repeated calls idempotent.
    fn compute_content_active(&self, geo: &dyn GeometryProvider) -> usize {
        let page = geo.page_metrics();
        let last_index = self.ids.len() - 1;

        // Top guard: at or above the first section's effective top.
        if let Some(first) = geo.section_rect(&self.ids[0]) {
            let top_threshold = first.doc_top(page.scroll_y) - self.config.sticky_offset;
            if page.scroll_y <= top_threshold + 1.0 {
                return 0;
            }
        }

        // Bottom guard: the page cannot scroll further, so the last
        // section wins even if it never reaches the threshold line.
        if page.scroll_y + page.viewport_height >= page.document_height - self.config.bottom_epsilon
        {
            return last_index;
        }

        let threshold = page.scroll_y + self.config.sticky_offset + self.config.switch_offset;

        let mut last_started = None;
        for (index, id) in self.ids.iter().enumerate() {
            let Some(rect) = geo.section_rect(id) else {
                continue;
            };
            if rect.doc_top(page.scroll_y) <= threshold {
                last_started = Some(index);
                if rect.doc_bottom(page.scroll_y) > threshold {
                    return index;
                }
            }
        }

        // Gap between sections, or threshold past every bottom edge: hold
        // the last section already begun.
        last_started.unwrap_or(0)
    }

    /// Queue a strip scroll that brings the tab at `index` into position.
    /// Ids without mounted tab geometry are skipped.
    fn align_strip(&mut self, geo: &dyn GeometryProvider, index: usize) {
        let Some(active) = geo.tab_rect(&self.ids[index]) else {
            return;
        };
        let last = self
            .ids
            .iter()
            .rev()
            .find_map(|id| geo.tab_rect(id))
            .unwrap_or(active);
        if let Some(left) =
            plan_strip_scroll(active, last, geo.strip_metrics(), self.config.strip_edge_gap)
        {
            self.commands.push(SyncCommand::ScrollStripTo { left });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
