//! Dirty region tracking for partial refresh.
//!
//! Accumulates the bounding boxes of strokes drawn since the last present;
//! the caller feeds the resulting rectangles to the partial-refresh renderer
//! as clip regions.

use super::shape::Shape;
use crate::util::Rect;

/// Tracks dirty rectangles accumulated between presents.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty, discarding accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle unless the tracker is already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds the bounding box of the given stroke. A stroke with no samples
    /// draws nothing and therefore contributes no damage.
    pub fn mark_shape(&mut self, shape: &Shape) {
        if let Some(rect) = shape.bounding_box() {
            self.mark_rect(rect);
        }
    }

    /// True when nothing has been marked since the last drain.
    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the regions gathered so far, clamped to the surface bounds.
    ///
    /// When the full surface was marked, returns a single rectangle covering
    /// it; otherwise returns the accumulated rectangles with offscreen parts
    /// clipped away.
    pub fn take_regions(&mut self, bounds: Rect) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            return vec![bounds];
        }
        self.regions
            .drain(..)
            .filter_map(|rect| rect.intersect(bounds))
            .collect()
    }

    /// Like [`take_regions`](Self::take_regions) but coalesced into one clip
    /// rectangle, which is what a single partial-refresh call consumes.
    pub fn take_union(&mut self, bounds: Rect) -> Option<Rect> {
        let regions = self.take_regions(bounds);
        let mut iter = regions.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, rect| acc.union(rect)))
    }
}
