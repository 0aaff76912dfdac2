// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use core::fmt;

use crate::layout::{pixel_count, LayoutError};

/// A half-open interval `[start, end)` of flat pixel indices.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Create a range, `start` must not exceed `end`.
    ///
    /// # Panics
    /// When `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Range start {} exceeds end {}", start, end);
        Range { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The equivalent standard range, suitable for slicing.
    pub fn as_std(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }

    fn scale(self, factor: usize) -> Self {
        Range {
            start: self.start * factor,
            end: self.end * factor,
        }
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `[0, total)` into `workers` ordered, disjoint and contiguous ranges.
///
/// Each range but the last receives `total / workers` units, the last one additionally takes the
/// remainder. The union of all ranges is exactly `[0, total)`, no unit is dropped even when the
/// division is not even. With more workers than units every range except the last is empty.
///
/// ```
/// use graysplit_texel::{partition, Range};
///
/// let ranges = partition(10, 3)?;
/// assert_eq!(ranges, [Range::new(0, 3), Range::new(3, 6), Range::new(6, 10)]);
///
/// let ranges = partition(2, 4)?;
/// assert_eq!(ranges, [Range::new(0, 0), Range::new(0, 0), Range::new(0, 0), Range::new(0, 2)]);
/// # Ok::<(), graysplit_texel::LayoutError>(())
/// ```
///
/// Fails with [`LayoutError::NoWorkers`] if `workers` is zero.
pub fn partition(total: usize, workers: usize) -> Result<Vec<Range>, LayoutError> {
    if workers == 0 {
        return Err(LayoutError::NoWorkers);
    }

    let share = total / workers;
    let ranges = (0..workers)
        .map(|index| {
            let start = index * share;
            let end = if index + 1 == workers {
                total
            } else {
                start + share
            };
            Range { start, end }
        })
        .collect();

    Ok(ranges)
}

/// Split the rows of a `width x height` image among `workers`, in pixel index space.
///
/// Follows the rules of [`partition`] applied to the rows. Every resulting range therefore starts
/// and ends on a row boundary, the last one also taking the remaining rows.
///
/// ```
/// use graysplit_texel::{partition_rows, Range};
///
/// let ranges = partition_rows(4, 3, 2)?;
/// assert_eq!(ranges, [Range::new(0, 4), Range::new(4, 12)]);
/// # Ok::<(), graysplit_texel::LayoutError>(())
/// ```
pub fn partition_rows(
    width: usize,
    height: usize,
    workers: usize,
) -> Result<Vec<Range>, LayoutError> {
    // Validates that no scaled index overflows.
    pixel_count(width, height)?;

    let rows = partition(height, workers)?;
    Ok(rows.into_iter().map(|rows| rows.scale(width)).collect())
}
