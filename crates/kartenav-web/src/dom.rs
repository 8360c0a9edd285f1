#![forbid(unsafe_code)]

//! DOM-backed geometry snapshots.
//!
//! Element lookup convention: each section element carries its category id
//! as the DOM id, each tab element carries `tab-<id>`. Missing elements
//! report no geometry and the core engine skips them.

use kartenav_core::geometry::{GeometryProvider, PageMetrics, SectionRect, StripMetrics, TabRect};
use web_sys::{Document, Element, Window};

pub(crate) struct DomGeometry {
    window: Window,
    document: Document,
    strip: Element,
    /// Viewport top offset at or below which the strip counts as stuck to
    /// the sticky header.
    stuck_at: f64,
}

impl DomGeometry {
    pub(crate) fn new(strip: Element, stuck_at: f64) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            strip,
            stuck_at,
        })
    }
}

impl GeometryProvider for DomGeometry {
    fn section_rect(&self, id: &str) -> Option<SectionRect> {
        let rect = self
            .document
            .get_element_by_id(id)?
            .get_bounding_client_rect();
        Some(SectionRect::new(rect.top(), rect.bottom()))
    }

    fn tab_rect(&self, id: &str) -> Option<TabRect> {
        let rect = self
            .document
            .get_element_by_id(&format!("tab-{id}"))?
            .get_bounding_client_rect();
        // Convert from viewport coordinates into the strip's scroll-content
        // coordinate space the alignment planner works in.
        let strip_rect = self.strip.get_bounding_client_rect();
        let left = rect.left() - strip_rect.left() + f64::from(self.strip.scroll_left());
        Some(TabRect::new(left, rect.width()))
    }

    fn strip_metrics(&self) -> StripMetrics {
        let top = self.strip.get_bounding_client_rect().top();
        StripMetrics {
            scroll_left: f64::from(self.strip.scroll_left()),
            scroll_width: f64::from(self.strip.scroll_width()),
            client_width: f64::from(self.strip.client_width()),
            stuck: top <= self.stuck_at + 0.5,
        }
    }

    fn page_metrics(&self) -> PageMetrics {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let (viewport_height, document_height) = match self.document.document_element() {
            Some(root) => (
                f64::from(root.client_height()),
                f64::from(root.scroll_height()),
            ),
            None => (0.0, 0.0),
        };
        PageMetrics {
            scroll_y,
            viewport_height,
            document_height,
        }
    }
}
