// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use core::slice;

use crate::layout::{pixel_count, LayoutError};
use crate::pixel::{Channels, Rgb};

/// An owned image of `width * height` pixel records, stored row-major without padding.
///
/// The dimensions are fixed at construction and the length of the storage always equals their
/// product. Every constructor checks this, there is no way to obtain a buffer that is shorter
/// than its dimensions claim.
///
/// Mutation happens through [`as_mut_slice`], which hands out the whole sequence. Parallel
/// processing splits that slice into disjoint parts, each part being exclusively borrowed by one
/// worker; the buffer itself is never shared.
///
/// [`as_mut_slice`]: Self::as_mut_slice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer<P = Rgb> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

impl<P: Channels> PixelBuffer<P> {
    /// Allocate a black image.
    ///
    /// # Panics
    /// When allocation of memory fails.
    pub fn new(width: usize, height: usize) -> Result<Self, LayoutError> {
        let len = pixel_count(width, height)?;
        Ok(PixelBuffer {
            width,
            height,
            pixels: vec![bytemuck::Zeroable::zeroed(); len],
        })
    }

    /// Take ownership of an already decoded pixel sequence.
    ///
    /// Fails if the sequence does not contain exactly `width * height` records.
    ///
    /// ```
    /// use graysplit_texel::{LayoutError, PixelBuffer, Rgb};
    ///
    /// let short = vec![Rgb::BLACK; 5];
    /// let error = PixelBuffer::from_pixels(3, 3, short).unwrap_err();
    /// assert!(matches!(error, LayoutError::LengthMismatch { expected: 9, actual: 5, .. }));
    /// ```
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<P>) -> Result<Self, LayoutError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(LayoutError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Copy pixels from their raw byte representation.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, LayoutError> {
        let pixels: &[P] =
            bytemuck::try_cast_slice(bytes).map_err(|_| LayoutError::PartialPixel {
                len: bytes.len(),
                size: core::mem::size_of::<P>(),
            })?;
        Self::from_pixels(width, height, pixels.to_vec())
    }

    /// Initialize each pixel from its coordinates, `f(x, y)`.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> P,
    ) -> Result<Self, LayoutError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }

        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of pixels, `width * height`.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    /// View the pixels as bytes, in the physical channel order of `P`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the pixel at column `x` of row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&P> {
        if x >= self.width {
            return None;
        }

        self.pixels.get(y * self.width + x)
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> slice::ChunksExact<'_, P> {
        // An image without columns has no pixels, the chunk size only needs to be non-zero.
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn rows_mut(&mut self) -> slice::ChunksExactMut<'_, P> {
        self.pixels.chunks_exact_mut(self.width.max(1))
    }

    /// Copy into a buffer of another channel order, preserving semantic values.
    pub fn convert<Q: Channels>(&self) -> PixelBuffer<Q> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .map(|&pixel| Q::from_rgb(pixel.to_rgb()))
                .collect(),
        }
    }
}
