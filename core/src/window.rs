//! Windowed render index: row virtualization for fixed-height tables.
//!
//! Given a row count, a per-row height, the viewport height, the scroll
//! offset and an overscan count, compute the contiguous index range
//! `[start, end)` of rows to render, each row's absolute offset, and the
//! total scrollable height used to size the spacer element.
//!
//! - [`WindowRequest`] is the pure input; [`WindowRequest::compute`]
//!   produces a [`WindowSlice`].
//! - [`RowWindow`] holds the live scroll state for one table and caches the
//!   last slice, recomputing only when offset, viewport or length change.

use crate::{
    error::{ConsoleError, ConsoleResult},
    types::Pixels,
};
use serde::{Deserialize, Serialize};

/// Inputs to one windowing pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRequest {
    pub row_count:       usize,
    pub row_height:      Pixels,
    pub viewport_height: Pixels,
    pub scroll_offset:   Pixels,
    pub overscan:        usize,
}

/// A row to render and where to place it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VirtualRow {
    pub index:  usize,
    /// Absolute top offset within the spacer.
    pub offset: Pixels,
    pub size:   Pixels,
}

/// Result of one windowing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSlice {
    /// Rows intersecting the viewport (inclusive start).
    pub visible_start: usize,
    /// Rows intersecting the viewport (exclusive end).
    pub visible_end:   usize,
    /// Render range including overscan (inclusive start).
    pub start:         usize,
    /// Render range including overscan (exclusive end).
    pub end:           usize,
    pub rows:          Vec<VirtualRow>,
    /// `row_count * row_height`.
    pub total_height:  Pixels,
}

impl WindowSlice {
    pub fn empty() -> Self {
        Self {
            visible_start: 0,
            visible_end:   0,
            start:         0,
            end:           0,
            rows:          Vec::new(),
            total_height:  0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of rows in the render range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

impl WindowRequest {
    pub fn validate(&self) -> ConsoleResult<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConsoleError::InvalidRowHeight { height: self.row_height });
        }
        if !(self.viewport_height.is_finite() && self.viewport_height >= 0.0) {
            return Err(ConsoleError::InvalidViewport { height: self.viewport_height });
        }
        Ok(())
    }

    /// Compute the render window. Negative or non-finite scroll offsets are
    /// treated as 0; offsets past the end yield a range clamped to the tail.
    pub fn compute(&self) -> ConsoleResult<WindowSlice> {
        self.validate()?;

        let n = self.row_count;
        if n == 0 {
            return Ok(WindowSlice::empty());
        }

        let h = self.row_height;
        let scroll = if self.scroll_offset.is_finite() { self.scroll_offset.max(0.0) } else { 0.0 };

        // Row i spans [i*h, (i+1)*h). It intersects [scroll, scroll+v) iff
        // floor(scroll/h) <= i < ceil((scroll+v)/h).
        let bottom = scroll + self.viewport_height;
        let mut first = ((scroll / h).floor() as usize).min(n);
        let mut last = ((bottom / h).ceil() as usize).min(n);

        // Division can round across a row boundary; settle on the spans themselves.
        while first > 0 && (first - 1) as f64 * h + h > scroll {
            first -= 1;
        }
        while last < n && last as f64 * h < bottom {
            last += 1;
        }
        let last = last.max(first);

        let start = first.saturating_sub(self.overscan);
        let end = last.saturating_add(self.overscan).min(n);

        let rows = (start..end)
            .map(|index| VirtualRow {
                index,
                offset: index as f64 * h,
                size:   h,
            })
            .collect();

        Ok(WindowSlice {
            visible_start: first,
            visible_end:   last,
            start,
            end,
            rows,
            total_height: n as f64 * h,
        })
    }
}

// ---------------------------------------------------------------------------
// Live window state
// ---------------------------------------------------------------------------

/// Mutable scroll state for one table, with a cached slice.
#[derive(Debug, Clone)]
pub struct RowWindow {
    request: WindowRequest,
    cached:  Option<WindowSlice>,
}

impl RowWindow {
    pub fn new(row_height: Pixels, viewport_height: Pixels, overscan: usize) -> ConsoleResult<Self> {
        let request = WindowRequest {
            row_count: 0,
            row_height,
            viewport_height,
            scroll_offset: 0.0,
            overscan,
        };
        request.validate()?;
        Ok(Self { request, cached: None })
    }

    pub fn request(&self) -> &WindowRequest {
        &self.request
    }

    /// Largest offset that still fills the viewport: `max(0, N*H - V)`.
    pub fn max_scroll_offset(&self) -> Pixels {
        let r = &self.request;
        (r.row_count as f64 * r.row_height - r.viewport_height).max(0.0)
    }

    /// Clamps to `[0, max_scroll_offset]`; non-finite offsets become 0.
    /// Returns true if the stored offset changed.
    pub fn set_scroll_offset(&mut self, offset: Pixels) -> bool {
        let offset = if offset.is_finite() { offset.clamp(0.0, self.max_scroll_offset()) } else { 0.0 };
        if self.request.scroll_offset == offset {
            return false;
        }
        self.request.scroll_offset = offset;
        self.cached = None;
        true
    }

    /// Returns true if the height changed.
    pub fn set_viewport_height(&mut self, height: Pixels) -> ConsoleResult<bool> {
        if self.request.viewport_height == height {
            return Ok(false);
        }
        let mut next = self.request;
        next.viewport_height = height;
        next.validate()?;
        self.request = next;
        self.clamp_scroll();
        self.cached = None;
        Ok(true)
    }

    /// Returns true if the length changed. A shrinking list pulls the scroll
    /// offset back to the new maximum, the way a native scroll container does.
    pub fn set_row_count(&mut self, count: usize) -> bool {
        if self.request.row_count == count {
            return false;
        }
        self.request.row_count = count;
        self.clamp_scroll();
        self.cached = None;
        true
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll_offset();
        if self.request.scroll_offset > max {
            self.request.scroll_offset = max;
        }
    }

    /// Current slice, recomputed only if an input changed since the last call.
    pub fn slice(&mut self) -> ConsoleResult<&WindowSlice> {
        if self.cached.is_none() {
            let slice = self.request.compute()?;
            log::debug!(
                "window recomputed: rows={} render={}..{} total_height={}",
                self.request.row_count,
                slice.start,
                slice.end,
                slice.total_height
            );
            self.cached = Some(slice);
        }
        Ok(self.cached.get_or_insert_with(WindowSlice::empty))
    }

    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }
}
