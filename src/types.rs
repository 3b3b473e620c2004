//! Core types shared by the viewport state machines.
//!
//! All geometry is in CSS pixels, viewport-relative unless noted, with the
//! y axis growing downwards (top < bottom).

use std::fmt;

// =============================================================================
// Region identity
// =============================================================================

/// Opaque identifier for a region of the page the host knows how to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned bounding box, as returned by a bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Rect {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }

    /// Rectangle anchored at the origin with the given size.
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, height, 0.0, width)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Shift vertically by `dy` (negative moves up).
    pub fn offset_y(&self, dy: f64) -> Self {
        Self::new(self.top + dy, self.bottom + dy, self.left, self.right)
    }

    /// True when the two rectangles share a region of positive area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.bottom > other.top
            && self.top < other.bottom
            && self.right > other.left
            && self.left < other.right
    }

    /// True when `y` lies strictly between this rectangle's top and bottom edges.
    pub fn spans_y(&self, y: f64) -> bool {
        y > self.top && y < self.bottom
    }
}

// =============================================================================
// Intersection options
// =============================================================================

/// Offsets applied to the viewport's edges before testing intersection.
///
/// Positive values grow the root box, negative values shrink it, matching
/// CSS `rootMargin` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Margin on the top edge only.
    pub const fn top(top: f64) -> Self {
        Self { top, right: 0.0, bottom: 0.0, left: 0.0 }
    }

    /// Apply to a viewport rectangle, producing the effective root box.
    pub fn apply(&self, viewport: &Rect) -> Rect {
        Rect::new(
            viewport.top - self.top,
            viewport.bottom + self.bottom,
            viewport.left - self.left,
            viewport.right + self.right,
        )
    }
}

/// Options passed when registering an intersection observer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntersectionOptions {
    pub margin: RootMargin,
    /// Visible fraction required to count as intersecting. Only 0 is
    /// evaluated by the simulated host; other values are forwarded as-is.
    pub threshold: f64,
}

impl IntersectionOptions {
    pub const fn with_margin(margin: RootMargin) -> Self {
        Self { margin, threshold: 0.0 }
    }

    /// Whether `target` counts as intersecting `viewport` under these options.
    pub fn is_intersecting(&self, target: &Rect, viewport: &Rect) -> bool {
        target.intersects(&self.margin.apply(viewport))
    }
}

// =============================================================================
// Scrolling
// =============================================================================

/// Horizontal scroll geometry of a scrollable container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    /// Total width of the scrolled content.
    pub content_width: f64,
    /// Width of the visible part of the container.
    pub viewport_width: f64,
}

impl ScrollExtent {
    pub const fn new(content_width: f64, viewport_width: f64) -> Self {
        Self { content_width, viewport_width }
    }

    /// Largest valid scroll offset (0 when the content fits).
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }
}

/// How a host should move a scroll container to a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    Instant,
    #[default]
    Smooth,
}

/// Window-level notifications a component may subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Scroll,
    Resize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_margin_shrinks_root() {
        let viewport = Rect::sized(1280.0, 720.0);
        let root = RootMargin::top(-30.0).apply(&viewport);
        assert_eq!(root.top, 30.0);
        assert_eq!(root.bottom, 720.0);
    }

    #[test]
    fn test_intersection_respects_margin() {
        let viewport = Rect::sized(1280.0, 720.0);
        let options = IntersectionOptions::with_margin(RootMargin::top(-30.0));

        // Bottom edge at 20px is above the shrunk root top (30px).
        let barely_visible = Rect::new(-780.0, 20.0, 0.0, 1280.0);
        assert!(barely_visible.intersects(&viewport));
        assert!(!options.is_intersecting(&barely_visible, &viewport));

        let visible = Rect::new(-700.0, 100.0, 0.0, 1280.0);
        assert!(options.is_intersecting(&visible, &viewport));
    }

    #[test]
    fn test_spans_y_is_strict() {
        let band = Rect::new(100.0, 200.0, 0.0, 10.0);
        assert!(band.spans_y(150.0));
        assert!(!band.spans_y(100.0));
        assert!(!band.spans_y(200.0));
    }

    #[test]
    fn test_max_offset_never_negative() {
        assert_eq!(ScrollExtent::new(1400.0, 400.0).max_offset(), 1000.0);
        assert_eq!(ScrollExtent::new(300.0, 400.0).max_offset(), 0.0);
    }
}
