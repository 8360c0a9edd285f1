//! Property tests for scroll-sync activation and strip alignment.
//!
//! Invariants checked:
//! 1. Activation is a pure function of geometry and scroll position:
//!    two engines fed the same snapshot agree, and repeated frames over
//!    unchanged geometry never move the highlight.
//! 2. Scrolling monotonically downward never moves the active category
//!    backwards in the sequence.
//! 3. The visually active id is always a member of the category sequence.
//! 4. The bottom of the document always activates the last category.
//! 5. A planned strip scroll stays within `[0, max_scroll_left]` and is a
//!    fixed point: applying it and planning again yields no further move.
//! 6. A tab click never asks the page to scroll to a negative offset.

use kartenav_core::align::plan_strip_scroll;
use kartenav_core::clock::Timestamp;
use kartenav_core::geometry::{
    GeometryProvider, PageMetrics, SectionRect, StripMetrics, TabRect,
};
use kartenav_core::sync::{ScrollSync, SyncCommand, SyncConfig};
use proptest::prelude::*;

/// Stacked sections and a pitch-spaced tab row, both derived from the
/// same per-category dimension list.
#[derive(Debug)]
struct Layout {
    ids: Vec<String>,
    section_tops: Vec<f64>,
    section_bottoms: Vec<f64>,
    tabs: Vec<TabRect>,
    strip: StripMetrics,
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
}

impl Layout {
    fn build(heights: &[f64], tab_widths: &[f64], viewport_height: f64) -> Self {
        let ids = (0..heights.len()).map(|i| format!("cat-{i}")).collect();
        let mut section_tops = Vec::with_capacity(heights.len());
        let mut section_bottoms = Vec::with_capacity(heights.len());
        let mut cursor = 0.0;
        for &h in heights {
            section_tops.push(cursor);
            cursor += h;
            section_bottoms.push(cursor);
        }
        let mut tabs = Vec::with_capacity(tab_widths.len());
        let mut left = 0.0;
        for &w in tab_widths {
            tabs.push(TabRect::new(left, w));
            left += w + 12.0;
        }
        let scroll_width = (left - 12.0).max(0.0);
        Self {
            ids,
            section_tops,
            section_bottoms,
            tabs,
            strip: StripMetrics {
                scroll_left: 0.0,
                scroll_width,
                client_width: 360.0,
                stuck: false,
            },
            scroll_y: 0.0,
            viewport_height,
            document_height: cursor.max(viewport_height),
        }
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }
}

impl GeometryProvider for Layout {
    fn section_rect(&self, id: &str) -> Option<SectionRect> {
        let i = self.index_of(id)?;
        Some(SectionRect::new(
            self.section_tops[i] - self.scroll_y,
            self.section_bottoms[i] - self.scroll_y,
        ))
    }

    fn tab_rect(&self, id: &str) -> Option<TabRect> {
        let i = self.index_of(id)?;
        self.tabs.get(i).copied()
    }

    fn strip_metrics(&self) -> StripMetrics {
        self.strip
    }

    fn page_metrics(&self) -> PageMetrics {
        PageMetrics {
            scroll_y: self.scroll_y,
            viewport_height: self.viewport_height,
            document_height: self.document_height,
        }
    }
}

fn layout_strategy() -> impl Strategy<Value = Layout> {
    (2usize..=8).prop_flat_map(|n| {
        (
            prop::collection::vec(120.0f64..1200.0, n),
            prop::collection::vec(60.0f64..180.0, n),
            500.0f64..900.0,
        )
            .prop_map(|(heights, widths, viewport)| Layout::build(&heights, &widths, viewport))
    })
}

fn engine_for(layout: &Layout) -> ScrollSync {
    ScrollSync::new(layout.ids.iter().cloned(), SyncConfig::default())
}

proptest! {
    // Invariant 1: pure function of the snapshot.
    #[test]
    fn activation_is_deterministic(mut layout in layout_strategy(), frac in 0.0f64..1.0) {
        layout.scroll_y = frac * layout.max_scroll();

        let mut a = engine_for(&layout);
        let mut b = engine_for(&layout);
        a.on_frame(&layout, Timestamp::from_millis(0.0));
        b.on_frame(&layout, Timestamp::from_millis(0.0));
        prop_assert_eq!(a.visual_active(), b.visual_active());

        let before = a.visual_active().map(str::to_owned);
        for frame in 1..4 {
            a.on_scroll();
            a.on_frame(&layout, Timestamp::from_millis(frame as f64 * 16.0));
            prop_assert_eq!(a.visual_active().map(str::to_owned), before.clone());
        }
    }

    // Invariant 2: no backwards jumps on a downward scroll.
    #[test]
    fn downward_scroll_is_monotone(mut layout in layout_strategy(), step in 10.0f64..400.0) {
        let mut sync = engine_for(&layout);
        let mut last_ordinal = 0usize;
        let mut frame = 0.0;
        while layout.scroll_y < layout.max_scroll() {
            sync.on_scroll();
            sync.on_frame(&layout, Timestamp::from_millis(frame));
            let active = sync.visual_active().expect("sequence is non-empty");
            let ordinal = layout.index_of(active).expect("active id is a member");
            prop_assert!(
                ordinal >= last_ordinal,
                "active ordinal regressed from {} to {} at scroll_y={}",
                last_ordinal, ordinal, layout.scroll_y
            );
            last_ordinal = ordinal;
            layout.scroll_y = (layout.scroll_y + step).min(layout.max_scroll());
            frame += 16.0;
            if layout.scroll_y >= layout.max_scroll() {
                sync.on_scroll();
                sync.on_frame(&layout, Timestamp::from_millis(frame));
                break;
            }
        }
    }

    // Invariant 3: visual id stays within the sequence across arbitrary
    // scroll positions and clicks.
    #[test]
    fn visual_active_is_always_a_member(
        mut layout in layout_strategy(),
        fracs in prop::collection::vec(0.0f64..1.0, 1..12),
        click in 0usize..8,
    ) {
        let mut sync = engine_for(&layout);
        let mut frame = 0.0;
        for frac in fracs {
            layout.scroll_y = frac * layout.max_scroll();
            sync.on_scroll();
            sync.on_frame(&layout, Timestamp::from_millis(frame));
            let active = sync.visual_active().expect("sequence is non-empty");
            prop_assert!(layout.index_of(active).is_some());
            frame += 16.0;
        }
        if click < layout.ids.len() {
            let id = layout.ids[click].clone();
            sync.on_tab_click(&id, &layout, Timestamp::from_millis(frame));
            prop_assert_eq!(sync.visual_active(), Some(id.as_str()));
        }
    }

    // Invariant 4: the document bottom always selects the last category.
    #[test]
    fn document_bottom_activates_last(mut layout in layout_strategy()) {
        prop_assume!(layout.max_scroll() > 0.0);
        layout.scroll_y = layout.max_scroll();
        let mut sync = engine_for(&layout);
        sync.on_frame(&layout, Timestamp::from_millis(0.0));
        prop_assert_eq!(
            sync.visual_active(),
            layout.ids.last().map(String::as_str)
        );
    }

    // Invariant 5: strip plans are clamped and self-stable.
    #[test]
    fn strip_plan_is_clamped_fixed_point(
        layout in layout_strategy(),
        active in 0usize..8,
        offset_frac in 0.0f64..1.0,
        stuck in any::<bool>(),
    ) {
        prop_assume!(active < layout.tabs.len());
        let mut strip = layout.strip;
        strip.scroll_left = offset_frac * strip.max_scroll_left();
        strip.stuck = stuck;
        let tab = layout.tabs[active];
        let last = *layout.tabs.last().expect("at least two tabs");

        if let Some(left) = plan_strip_scroll(tab, last, strip, 8.0) {
            prop_assert!(left >= 0.0 && left <= strip.max_scroll_left());
            let mut applied = strip;
            applied.scroll_left = left;
            prop_assert_eq!(plan_strip_scroll(tab, last, applied, 8.0), None);
        }
    }

    // Invariant 6: tab clicks never request a negative page offset.
    #[test]
    fn click_scroll_target_is_non_negative(layout in layout_strategy(), click in 0usize..8) {
        prop_assume!(click < layout.ids.len());
        let mut sync = engine_for(&layout);
        sync.on_frame(&layout, Timestamp::from_millis(0.0));
        let id = layout.ids[click].clone();
        sync.on_tab_click(&id, &layout, Timestamp::from_millis(16.0));
        for command in sync.take_commands() {
            if let SyncCommand::ScrollPageTo { top } = command {
                prop_assert!(top >= 0.0, "negative page target {top}");
            }
        }
    }
}
