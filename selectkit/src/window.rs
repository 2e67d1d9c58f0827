//! Viewport windowing for long option lists.
//!
//! Only the rows intersecting the scroll viewport (plus a small overscan
//! margin) are materialized. The rendered rows are translated down by
//! [`Window::top_offset`] inside a spacer of [`Viewport::spacer_height`] so the
//! scroll range matches the full list.

/// Rows rendered past the visible viewport to hide scroll-to-paint latency.
pub const DEFAULT_OVERSCAN: usize = 2;

// =============================================================================
// Viewport
// =============================================================================

/// Inputs to the windowing calculation.
///
/// `item_height` and `viewport_height` must be positive. `scroll_offset` is
/// expected to be clamped by the caller (see [`Viewport::clamp_offset`]), but
/// out-of-range offsets still produce a valid window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_offset: u32,
    pub item_height: u32,
    pub viewport_height: u32,
    pub total_count: usize,
}

impl Viewport {
    pub fn new(total_count: usize, item_height: u32, viewport_height: u32) -> Self {
        Self {
            scroll_offset: 0,
            item_height,
            viewport_height,
            total_count,
        }
    }

    /// Return a copy scrolled to `offset`.
    pub fn at(mut self, offset: u32) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Compute the materialized window for the current scroll offset.
    ///
    /// Recomputed on every call; O(1) regardless of `total_count`.
    pub fn window(&self, overscan: usize) -> Window {
        if self.item_height == 0 || self.total_count == 0 {
            return Window::default();
        }

        let visible_count = self.viewport_height.div_ceil(self.item_height) as usize;
        let start = ((self.scroll_offset / self.item_height) as usize).min(self.total_count - 1);
        let end = start
            .saturating_add(visible_count)
            .saturating_add(overscan)
            .min(self.total_count);

        Window {
            visible_count,
            start,
            end,
            top_offset: start as u64 * u64::from(self.item_height),
        }
    }

    /// Height of the full-list spacer.
    pub fn spacer_height(&self) -> u64 {
        self.total_count as u64 * u64::from(self.item_height)
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> u32 {
        let max = self
            .spacer_height()
            .saturating_sub(u64::from(self.viewport_height));
        u32::try_from(max).unwrap_or(u32::MAX)
    }

    /// Clamp an offset into `[0, max_scroll]`.
    pub fn clamp_offset(&self, offset: u32) -> u32 {
        offset.min(self.max_scroll())
    }

    /// Index of the row under a position measured from the top of the viewport.
    pub fn index_at(&self, y: u32) -> Option<usize> {
        if self.item_height == 0 || y >= self.viewport_height {
            return None;
        }
        let index = (u64::from(self.scroll_offset) + u64::from(y)) / u64::from(self.item_height);
        let index = usize::try_from(index).ok()?;
        (index < self.total_count).then_some(index)
    }
}

// =============================================================================
// Window
// =============================================================================

/// The contiguous range of rows to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// Rows that fit in the viewport, rounded up.
    pub visible_count: usize,
    /// First materialized row (inclusive).
    pub start: usize,
    /// Last materialized row (exclusive).
    pub end: usize,
    /// Distance from the spacer top to the first materialized row.
    pub top_offset: u64,
}

impl Window {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

// =============================================================================
// VirtualScroll
// =============================================================================

/// Scroll offset of a windowed list.
///
/// Every mutation clamps against the viewport it is given, so the stored
/// offset is always in range for the list it was last applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualScroll {
    offset: u32,
}

impl VirtualScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Scroll by a signed delta. Returns true if the offset changed.
    pub fn scroll_by(&mut self, delta: i64, viewport: &Viewport) -> bool {
        let target = i64::from(self.offset)
            .saturating_add(delta)
            .clamp(0, i64::from(viewport.max_scroll()));
        self.set(target as u32)
    }

    /// Scroll to an absolute offset. Returns true if the offset changed.
    pub fn scroll_to(&mut self, offset: u32, viewport: &Viewport) -> bool {
        self.set(viewport.clamp_offset(offset))
    }

    /// Scroll the minimum distance needed to show row `index` in full.
    pub fn scroll_into_view(&mut self, index: usize, viewport: &Viewport) -> bool {
        if index >= viewport.total_count {
            return false;
        }
        let item_height = u64::from(viewport.item_height);
        let top = index as u64 * item_height;
        let bottom = top + item_height;
        let offset = u64::from(self.offset);
        let height = u64::from(viewport.viewport_height);

        let target = if top < offset {
            top
        } else if bottom > offset + height {
            bottom.saturating_sub(height)
        } else {
            return false;
        };
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX), viewport)
    }

    pub fn page_up(&mut self, viewport: &Viewport) -> bool {
        self.scroll_by(-i64::from(viewport.viewport_height), viewport)
    }

    pub fn page_down(&mut self, viewport: &Viewport) -> bool {
        self.scroll_by(i64::from(viewport.viewport_height), viewport)
    }

    /// Back to the top.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    fn set(&mut self, offset: u32) -> bool {
        if offset == self.offset {
            return false;
        }
        log::trace!("VirtualScroll offset {} -> {}", self.offset, offset);
        self.offset = offset;
        true
    }
}
