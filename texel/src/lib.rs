// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
//! # Texel
//!
//! Pixel records and owned pixel buffers, together with the partitioning of a buffer's flat index
//! space into disjoint work ranges.
//!
//! A decoded image is represented as a [`PixelBuffer`] of a concrete pixel record. The record
//! type fixes the physical channel order of the memory: [`Rgb`] for most decoders, [`Bgr`] for
//! bitmap files. Every record converts to and from the semantic [`Rgb`] value through the
//! [`Channels`] trait, so transforms never need to know which order a container used.
//!
//! ## Usage
//!
//! ```
//! use graysplit_texel::{partition, PixelBuffer, Rgb};
//!
//! let mut image = PixelBuffer::<Rgb>::new(4, 3)?;
//! image.as_mut_slice()[5] = Rgb::new(0xff, 0x00, 0x00);
//!
//! // Split the twelve pixels among five workers, the last one takes the remainder.
//! let ranges = partition(image.len(), 5)?;
//! assert_eq!(ranges.len(), 5);
//! assert_eq!(ranges[4].len(), 4);
//! # Ok::<(), graysplit_texel::LayoutError>(())
//! ```
#![deny(unsafe_code)]

mod buffer;
mod layout;
mod pixel;
mod range;

pub use self::buffer::PixelBuffer;
pub use self::layout::{pixel_count, LayoutError};
pub use self::pixel::{Bgr, Channels, Rgb};
pub use self::range::{partition, partition_rows, Range};
