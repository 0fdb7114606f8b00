//! Half-open byte spans over an input buffer.

use serde::{Deserialize, Serialize};

/// A half-open `[begin, end)` span of byte offsets.
///
/// The default region is `[0, 0)`, which is empty. Parts of the runtime use
/// the default region as an "unset" marker (see the engine's ignore-span
/// handling).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub begin: usize,
    pub end: usize,
}

impl Region {
    /// Create a region spanning `[begin, end)`.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// True if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// True if `point` lies inside the span.
    pub fn contains(&self, point: usize) -> bool {
        point >= self.begin && point < self.end
    }

    /// True if `other` lies entirely inside this span.
    pub fn covers(&self, other: Region) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// True if the two spans share at least one byte.
    pub fn intersects(&self, other: Region) -> bool {
        !self.is_empty() && !other.is_empty() && self.begin < other.end && other.begin < self.end
    }

    /// The smallest region containing both spans.
    pub fn cover(&self, other: Region) -> Region {
        Region::new(self.begin.min(other.begin), self.end.max(other.end))
    }

    /// Remove the overlap with `other` from this span.
    ///
    /// A head overlap moves `begin` up to `other.end`; a tail overlap moves
    /// `end` down to `other.begin`. A span fully covered by `other`
    /// collapses to an empty region at `other.end`. An `other` strictly
    /// inside this span leaves it unchanged (a single region cannot
    /// represent the two remaining pieces).
    pub fn clip(&self, other: Region) -> Region {
        if !self.intersects(other) {
            return *self;
        }
        let mut r = *self;
        if other.begin <= r.begin {
            r.begin = r.begin.max(other.end);
        }
        if other.end >= r.end {
            r.end = r.end.min(other.begin);
        }
        if r.end < r.begin {
            r.end = r.begin;
        }
        r
    }

    /// Shift boundaries for an edit of `delta` bytes at `position`.
    ///
    /// Boundaries at or after `position` move by `delta`; a boundary inside
    /// a deleted span clamps to the deletion point.
    pub fn adjust(&mut self, position: usize, delta: isize) {
        self.begin = adjust_point(self.begin, position, delta);
        self.end = adjust_point(self.end, position, delta);
    }
}

fn adjust_point(point: usize, position: usize, delta: isize) -> usize {
    if point >= position {
        point.saturating_add_signed(delta)
    } else {
        let edit_floor = position.saturating_add_signed(delta);
        point.min(edit_floor)
    }
}
