// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers

/// An argument did not describe a valid image or work split.
///
/// All variants are reported before any memory is touched. In particular a buffer is never
/// created for a pixel sequence whose length disagrees with its dimensions, so a worker can not
/// later run past the end of its slice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Work was to be split among zero workers.
    #[error("the worker count must be positive")]
    NoWorkers,
    /// The pixel sequence does not hold exactly `width * height` records.
    #[error("a {width}x{height} image needs {expected} pixels, got {actual}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    /// A byte sequence is not a whole number of pixel records.
    #[error("{len} bytes do not form whole pixels of {size} bytes")]
    PartialPixel { len: usize, size: usize },
    /// The pixel count of the dimensions is not representable.
    #[error("a {width}x{height} image overflows the address space")]
    Overflow { width: usize, height: usize },
}

/// The number of pixels in an image of the given dimensions.
///
/// ```
/// use graysplit_texel::{pixel_count, LayoutError};
///
/// assert_eq!(pixel_count(3, 3), Ok(9));
/// assert!(matches!(pixel_count(usize::MAX, 2), Err(LayoutError::Overflow { .. })));
/// ```
pub fn pixel_count(width: usize, height: usize) -> Result<usize, LayoutError> {
    width
        .checked_mul(height)
        .ok_or(LayoutError::Overflow { width, height })
}
