use crate::query::error::RequestError;
use std::ops::Range;

/// Block coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Inclusive axis-aligned box of blocks.
///
/// Cells are linearised with y outermost, then z, then x, so index 0 is
/// `(min_x, min_y, min_z)` and consecutive indices walk along x first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchVolume {
    min: Coordinate,
    max: Coordinate,
}

impl SearchVolume {
    pub fn new(min: Coordinate, max: Coordinate) -> Result<Self, RequestError> {
        for (axis, lo, hi) in [('x', min.x, max.x), ('y', min.y, max.y), ('z', min.z, max.z)] {
            if lo > hi {
                return Err(RequestError::InvertedRange {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Coordinate {
        self.min
    }

    pub fn max(&self) -> Coordinate {
        self.max
    }

    /// Extent along each axis (at most 2^32, so u64 is enough).
    pub fn extent(&self) -> (u64, u64, u64) {
        (
            span(self.min.x, self.max.x),
            span(self.min.y, self.max.y),
            span(self.min.z, self.max.z),
        )
    }

    /// Total number of cells. Up to 2^96, hence u128.
    pub fn cell_count(&self) -> u128 {
        let (sx, sy, sz) = self.extent();
        sx as u128 * sy as u128 * sz as u128
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        (self.min.x..=self.max.x).contains(&c.x)
            && (self.min.y..=self.max.y).contains(&c.y)
            && (self.min.z..=self.max.z).contains(&c.z)
    }

    /// Coordinate of linear index `index`; `index` must be below
    /// [`cell_count`](Self::cell_count).
    pub fn coordinate_at(&self, index: u128) -> Coordinate {
        debug_assert!(index < self.cell_count());
        let (sx, _, sz) = self.extent();
        let ox = index % sx as u128;
        let rest = index / sx as u128;
        let oz = rest % sz as u128;
        let oy = rest / sz as u128;
        Coordinate {
            x: offset(self.min.x, ox as u64),
            y: offset(self.min.y, oy as u64),
            z: offset(self.min.z, oz as u64),
        }
    }

    /// Inverse of [`coordinate_at`](Self::coordinate_at); `c` must lie inside the box.
    pub fn index_of(&self, c: Coordinate) -> u128 {
        debug_assert!(self.contains(c));
        let (sx, _, sz) = self.extent();
        let ox = span(self.min.x, c.x) - 1;
        let oy = span(self.min.y, c.y) - 1;
        let oz = span(self.min.z, c.z) - 1;
        (oy as u128 * sz as u128 + oz as u128) * sx as u128 + ox as u128
    }

    /// Split `[0, cell_count)` into `workers` contiguous ranges, the last one
    /// taking the remainder. Ranges may be empty when there are more workers
    /// than cells.
    pub fn partition(&self, workers: usize) -> Vec<Range<u128>> {
        assert!(workers > 0, "partition needs at least one worker");
        let total = self.cell_count();
        let count = workers as u128;
        let chunk = total / count;

        (0..count)
            .map(|i| {
                let begin = i * chunk;
                let end = if i + 1 == count { total } else { begin + chunk };
                begin..end
            })
            .collect()
    }

    /// Walk the cells of `range` in index order.
    pub fn cells(&self, range: Range<u128>) -> Cells<'_> {
        let remaining = range.end.saturating_sub(range.start);
        let current = if remaining > 0 {
            self.coordinate_at(range.start)
        } else {
            self.min
        };
        Cells {
            volume: self,
            current,
            remaining,
        }
    }
}

/// Cursor over a contiguous index range, stepping x, then z, then y without
/// re-decomposing the index for every cell.
pub struct Cells<'a> {
    volume: &'a SearchVolume,
    current: Coordinate,
    remaining: u128,
}

impl Iterator for Cells<'_> {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Coordinate> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.current;
        self.remaining -= 1;

        if self.remaining > 0 {
            let (min, max) = (self.volume.min, self.volume.max);
            let c = &mut self.current;
            if c.x < max.x {
                c.x += 1;
            } else {
                c.x = min.x;
                if c.z < max.z {
                    c.z += 1;
                } else {
                    c.z = min.z;
                    c.y += 1;
                }
            }
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Number of values in `lo..=hi`.
#[inline]
fn span(lo: i32, hi: i32) -> u64 {
    (hi as i64 - lo as i64 + 1) as u64
}

#[inline]
fn offset(base: i32, delta: u64) -> i32 {
    (base as i64 + delta as i64) as i32
}
