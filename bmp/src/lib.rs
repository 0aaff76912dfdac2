// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
//! Uncompressed 24-bit bitmap files.
//!
//! Bitmaps store each pixel as blue, green, red bytes and pad each row to a multiple of four
//! bytes. Decoding yields a [`PixelBuffer<Bgr>`] whose rows are ordered top to bottom, whatever
//! the row order of the file; the padding is dropped. Encoding writes a 54-byte header followed by
//! bottom-up rows.
//!
//! ```
//! use graysplit_bmp::{decode, encode, gradient};
//!
//! let image = gradient(5, 3)?;
//! let bytes = encode(&image)?;
//! // 3 rows of 15 bytes, each padded to 16.
//! assert_eq!(bytes.len(), 54 + 3 * 16);
//! assert_eq!(decode(&bytes)?, image);
//! # Ok::<(), graysplit_bmp::BmpError>(())
//! ```
#![deny(unsafe_code)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use graysplit_texel::{Bgr, LayoutError, PixelBuffer};

mod header;

pub use self::header::{Header, PIXEL_OFFSET};

/// A bitmap could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    #[error("bitmap i/o failed")]
    Io(#[from] io::Error),
    #[error("not a bitmap, the file starts with {0:?}")]
    Signature([u8; 2]),
    #[error("unsupported info header of {0} bytes")]
    InfoHeader(u32),
    #[error("only 24-bit pixels are supported, the file has {0} bits")]
    BitDepth(u16),
    #[error("compressed bitmaps are not supported, compression method {0}")]
    Compression(u32),
    #[error("pixel data at offset {0} overlaps the header")]
    PixelOffset(usize),
    #[error("the bitmap ends after {len} bytes, expected {expected}")]
    Truncated { len: usize, expected: usize },
    #[error("a {width}x{height} bitmap is not representable")]
    Dimensions { width: usize, height: usize },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Decode a complete bitmap file.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer<Bgr>, BmpError> {
    let header = Header::parse(bytes)?;
    let stride = header.stride()?;
    let expected = header
        .image_len()?
        .checked_add(header.pixel_offset)
        .ok_or(BmpError::Dimensions {
            width: header.width,
            height: header.height,
        })?;

    if bytes.len() < expected {
        return Err(BmpError::Truncated {
            len: bytes.len(),
            expected,
        });
    }

    let mut image = PixelBuffer::<Bgr>::new(header.width, header.height)?;
    let row_len = header.width * 3;
    let data = &bytes[header.pixel_offset..expected];

    if row_len > 0 {
        let rows = data.chunks_exact(stride);
        if header.bottom_up {
            for (target, source) in image.rows_mut().rev().zip(rows) {
                bytemuck::cast_slice_mut::<Bgr, u8>(target).copy_from_slice(&source[..row_len]);
            }
        } else {
            for (target, source) in image.rows_mut().zip(rows) {
                bytemuck::cast_slice_mut::<Bgr, u8>(target).copy_from_slice(&source[..row_len]);
            }
        }
    }

    log::debug!(
        "decoded {}x{} bitmap ({})",
        header.width,
        header.height,
        if header.bottom_up { "bottom-up" } else { "top-down" }
    );

    Ok(image)
}

/// Encode an image as a bottom-up bitmap file.
pub fn encode(image: &PixelBuffer<Bgr>) -> Result<Vec<u8>, BmpError> {
    let header = Header::new(image.width(), image.height());
    let stride = header.stride()?;
    let row_len = image.width() * 3;
    let padding = [0u8; 3];

    let mut bytes = Vec::with_capacity(PIXEL_OFFSET + header.image_len()?);
    bytes.extend_from_slice(&header.to_bytes()?);

    if row_len > 0 {
        for row in image.rows().rev() {
            bytes.extend_from_slice(bytemuck::cast_slice(row));
            bytes.extend_from_slice(&padding[..stride - row_len]);
        }
    }

    Ok(bytes)
}

/// Read a complete bitmap from a reader.
pub fn read(mut reader: impl Read) -> Result<PixelBuffer<Bgr>, BmpError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Write an image as a bitmap into a writer.
pub fn write(mut writer: impl Write, image: &PixelBuffer<Bgr>) -> Result<(), BmpError> {
    writer.write_all(&encode(image)?)?;
    writer.flush()?;
    Ok(())
}

/// Read a bitmap file from disk.
pub fn open(path: impl AsRef<Path>) -> Result<PixelBuffer<Bgr>, BmpError> {
    decode(&fs::read(path)?)
}

/// Write an image to disk as a bitmap file, replacing any existing file.
pub fn save(path: impl AsRef<Path>, image: &PixelBuffer<Bgr>) -> Result<(), BmpError> {
    fs::write(path, encode(image)?)?;
    Ok(())
}

/// A test image with red increasing to the right, green increasing downwards and constant blue.
///
/// ```
/// use graysplit_texel::Bgr;
///
/// let image = graysplit_bmp::gradient(256, 256)?;
/// assert_eq!(image.get(0, 0), Some(&Bgr::new(0, 0, 128)));
/// assert_eq!(image.get(255, 128), Some(&Bgr::new(254, 127, 128)));
/// # Ok::<(), graysplit_texel::LayoutError>(())
/// ```
pub fn gradient(width: usize, height: usize) -> Result<PixelBuffer<Bgr>, LayoutError> {
    PixelBuffer::from_fn(width, height, |x, y| {
        // x < width, so each quotient is below 255.
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        Bgr::new(r, g, 128)
    })
}
