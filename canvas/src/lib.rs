//! Parallel grayscale conversion of pixel buffers.
//!
//! The conversion of one pixel never looks at any other pixel. This is what permits splitting an
//! image into disjoint ranges and handing each range to its own thread: no worker can observe
//! another worker's writes, and the caller observes all of them once the run returns.
//!
//! # Usage
//!
//! Converting a bitmap-ordered buffer with four workers:
//! 1. Decode or create a [`PixelBuffer`](graysplit_texel::PixelBuffer)
//! 2. Choose the [`Luma`] weights and rounding
//! 3. Run an [`Executor`] over the buffer
//!
//! ```
//! use graysplit_canvas::{Executor, Luma, Rounding, Split, Weights};
//! use graysplit_texel::{Bgr, PixelBuffer};
//!
//! let mut image = PixelBuffer::from_fn(64, 48, |x, y| Bgr::new(x as u8, y as u8, 128))?;
//!
//! let luma = Luma::new(Weights::LEGACY, Rounding::Truncate);
//! Executor::new(4)
//!     .with_split(Split::Rows)
//!     .grayscale(&mut image, luma)?;
//!
//! assert!(image.as_slice().iter().all(|px| px.r == px.g && px.g == px.b));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unsafe_code)]

/// The thread dispatch and join.
mod executor;
/// The per-pixel conversion.
mod luma;


pub use self::executor::{run, ExecuteError, Executor, Split};
pub use self::luma::{Luma, Rounding, Weights, WEIGHT_SCALE};
