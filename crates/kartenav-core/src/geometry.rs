#![forbid(unsafe_code)]

//! Geometry snapshots supplied by the host.
//!
//! The engine never measures layout itself; it reads these snapshots on
//! demand through [`GeometryProvider`] and re-derives its state from them
//! on every recomputation. All values are CSS pixels (`f64`), matching DOM
//! measurement APIs.

/// Vertical bounding box of a category's content section, in viewport
/// coordinates (`getBoundingClientRect` convention: negative `top` means
/// the section top has scrolled above the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionRect {
    /// Top edge relative to the viewport.
    pub top: f64,
    /// Bottom edge relative to the viewport.
    pub bottom: f64,
}

impl SectionRect {
    /// Create a new section rect.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Section height, clamped to zero for degenerate rects.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Top edge in document coordinates given the current page scroll.
    #[inline]
    #[must_use]
    pub fn doc_top(&self, scroll_y: f64) -> f64 {
        self.top + scroll_y
    }

    /// Bottom edge in document coordinates given the current page scroll.
    #[inline]
    #[must_use]
    pub fn doc_bottom(&self, scroll_y: f64) -> f64 {
        self.bottom + scroll_y
    }
}

/// Horizontal placement of a tab button inside the strip's scrollable
/// content. `left` is the offset from the content origin (independent of
/// the strip's scroll position).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TabRect {
    /// Offset of the left edge inside the strip content.
    pub left: f64,
    /// Button width.
    pub width: f64,
}

impl TabRect {
    /// Create a new tab rect.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Right edge inside the strip content.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Horizontal center inside the strip content.
    #[inline]
    #[must_use]
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Scroll metrics of the tab strip container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StripMetrics {
    /// Current horizontal scroll offset.
    pub scroll_left: f64,
    /// Total content width.
    pub scroll_width: f64,
    /// Visible width.
    pub client_width: f64,
    /// Whether the strip is currently sticky-pinned to the viewport top.
    pub stuck: bool,
}

impl StripMetrics {
    /// Maximum reachable scroll offset, clamped to zero.
    #[inline]
    #[must_use]
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Whether the strip is scrolled to (or past) its maximum offset.
    ///
    /// A half-pixel tolerance absorbs fractional DOM scroll positions.
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.scroll_left >= self.max_scroll_left() - 0.5
    }
}

/// Document scroll position and viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageMetrics {
    /// Vertical scroll offset of the document.
    pub scroll_y: f64,
    /// Viewport height.
    pub viewport_height: f64,
    /// Total document height.
    pub document_height: f64,
}

/// Live geometry for the engine, supplied by the rendering layer.
///
/// Implementations return `None` for ids whose elements are not mounted
/// yet; the engine skips those ids. Metrics are read fresh on every call
/// and never cached across events, so recovery from a missed event is
/// automatic on the next one.
pub trait GeometryProvider {
    /// Viewport-relative bounding box of the category's content section.
    fn section_rect(&self, id: &str) -> Option<SectionRect>;

    /// Placement of the category's tab button inside the strip content.
    fn tab_rect(&self, id: &str) -> Option<TabRect>;

    /// Scroll metrics of the tab strip container.
    fn strip_metrics(&self) -> StripMetrics;

    /// Document scroll position and viewport size.
    fn page_metrics(&self) -> PageMetrics;
}
