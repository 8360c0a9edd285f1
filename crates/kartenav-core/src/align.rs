#![forbid(unsafe_code)]

//! Tab alignment planning.
//!
//! Given the active tab, decides where the scrollable tab strip should sit:
//! centered on the active tab in the common case, left-pinned near the end
//! of the strip (where centering would reveal nothing new) and while the
//! strip is sticky-pinned. The returned offset is a plan only; issuing
//! the smooth scroll is the host's job.
//!
//! # Invariants
//!
//! 1. The planned offset is always within `[0, max_scroll_left]`.
//! 2. A plan within one pixel of the current offset is suppressed (`None`),
//!    so repeated alignment of an already-aligned tab issues no scroll.
//! 3. With the last tab active the plan never scrolls past the hard end.

use crate::geometry::{StripMetrics, TabRect};

/// Plan a strip scroll offset for the active tab.
///
/// `active` and `last` are the active tab and the final tab in the strip
/// (equal when the active tab is the last one). `edge_gap` is the small
/// breathing space kept left of a left-pinned tab; it is dropped when the
/// strip is already at its hard end.
///
/// Returns the target `scroll_left`, or `None` when no scroll is needed.
#[must_use]
pub fn plan_strip_scroll(
    active: TabRect,
    last: TabRect,
    strip: StripMetrics,
    edge_gap: f64,
) -> Option<f64> {
    // Left-aligning the active tab would already reveal every remaining tab.
    let near_end = last.right() - active.left <= strip.client_width;
    let at_hard_end = strip.at_end();

    let target = if at_hard_end || near_end || strip.stuck {
        let gap = if at_hard_end { 0.0 } else { edge_gap };
        active.left - gap
    } else {
        active.center() - strip.client_width / 2.0
    };

    let clamped = target.clamp(0.0, strip.max_scroll_left());

    if (clamped - strip.scroll_left).abs() <= 1.0 {
        None
    } else {
        Some(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::plan_strip_scroll;
    use crate::geometry::{StripMetrics, TabRect};

    fn strip(scroll_left: f64) -> StripMetrics {
        StripMetrics {
            scroll_left,
            scroll_width: 1200.0,
            client_width: 400.0,
            stuck: false,
        }
    }

    #[test]
    fn centers_mid_strip_tab() {
        let active = TabRect::new(500.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        // center = 550, target = 550 - 200 = 350
        assert_eq!(
            plan_strip_scroll(active, last, strip(0.0), 8.0),
            Some(350.0)
        );
    }

    #[test]
    fn clamps_to_left_edge() {
        let active = TabRect::new(50.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        // center target would be negative
        assert_eq!(plan_strip_scroll(active, last, strip(120.0), 8.0), Some(0.0));
    }

    #[test]
    fn clamps_to_max_scroll() {
        let active = TabRect::new(1050.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        // near end: left-pin 1050 - 8 clamps to max (800)
        assert_eq!(
            plan_strip_scroll(active, last, strip(0.0), 8.0),
            Some(800.0)
        );
    }

    #[test]
    fn near_end_left_pins_instead_of_centering() {
        // Tabs from active.left=820 to last.right=1200 span 380 <= 400
        let active = TabRect::new(820.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        let planned = plan_strip_scroll(active, last, strip(300.0), 8.0)
            .expect("expected a scroll plan");
        assert_eq!(planned, 800.0); // 820 - 8 clamped to max 800
    }

    #[test]
    fn hard_end_drops_edge_gap() {
        let active = TabRect::new(700.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        let at_end = StripMetrics {
            scroll_left: 800.0,
            ..strip(0.0)
        };
        // left-pin without gap: 700, clamped within [0, 800]
        assert_eq!(plan_strip_scroll(active, last, at_end, 8.0), Some(700.0));
    }

    #[test]
    fn stuck_strip_left_pins() {
        let active = TabRect::new(500.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        let stuck = StripMetrics {
            stuck: true,
            ..strip(0.0)
        };
        assert_eq!(plan_strip_scroll(active, last, stuck, 8.0), Some(492.0));
    }

    #[test]
    fn noop_within_one_pixel() {
        let active = TabRect::new(500.0, 100.0);
        let last = TabRect::new(1100.0, 100.0);
        // already centered (target 350)
        assert_eq!(plan_strip_scroll(active, last, strip(350.4), 8.0), None);
    }

    #[test]
    fn unscrollable_strip_never_plans() {
        let active = TabRect::new(10.0, 80.0);
        let last = TabRect::new(200.0, 80.0);
        let narrow = StripMetrics {
            scroll_left: 0.0,
            scroll_width: 300.0,
            client_width: 400.0,
            stuck: false,
        };
        // max_scroll_left = 0, so every plan collapses to the current offset
        assert_eq!(plan_strip_scroll(active, last, narrow, 8.0), None);
    }

    #[test]
    fn active_is_last_tab() {
        let last = TabRect::new(1100.0, 100.0);
        // near_end trivially true: last.right - last.left = width <= client
        let planned = plan_strip_scroll(last, last, strip(0.0), 8.0)
            .expect("expected a scroll plan");
        assert_eq!(planned, 800.0);
    }
}
