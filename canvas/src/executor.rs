use core::any::Any;
use core::mem;
use std::{io, thread};

use graysplit_texel::{partition, partition_rows, Channels, LayoutError, PixelBuffer, Range, Rgb};

use crate::luma::Luma;

/// The unit by which an image is divided among workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Split {
    /// Divide the flat pixel sequence, ranges may begin and end mid-row.
    #[default]
    Pixels,
    /// Divide whole rows, the last worker takes the remaining rows.
    Rows,
}

/// A parallel run did not complete.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// The work could not be partitioned, e.g. zero workers were requested.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] LayoutError),
    /// A worker panicked while transforming its range.
    ///
    /// All other workers had been joined before this was reported. Only the first failure in
    /// dispatch order is kept.
    #[error("worker {index} panicked on pixels {range:?}: {message}")]
    WorkerPanic {
        index: usize,
        range: Range,
        message: String,
    },
    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker {index}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },
}

/// Applies a per-pixel transform to a buffer with a fixed number of worker threads.
///
/// Every call to [`run`] partitions the buffer anew, starts one scoped thread for each non-empty
/// range and blocks until all of them are joined. There is no pool: no thread exists before the
/// call and none survives it. Each worker receives exclusive ownership of a disjoint sub-slice of
/// the buffer, so the transform runs without any locking.
///
/// The executor does not choose a worker count by itself; this is left to the caller.
///
/// ```
/// use graysplit_canvas::{Executor, Luma};
/// use graysplit_texel::{PixelBuffer, Rgb};
///
/// let pixels = vec![
///     Rgb::new(255, 0, 0),
///     Rgb::new(0, 255, 0),
///     Rgb::new(0, 0, 255),
///     Rgb::new(255, 255, 255),
/// ];
/// let mut image = PixelBuffer::from_pixels(2, 2, pixels)?;
///
/// Executor::new(2).grayscale(&mut image, Luma::default())?;
/// let grays: Vec<u8> = image.as_slice().iter().map(|px| px.r).collect();
/// assert_eq!(grays, [76, 150, 29, 255]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// [`run`]: Self::run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Executor {
    workers: usize,
    split: Split,
}

impl Executor {
    /// An executor for `workers` threads, splitting by pixels.
    ///
    /// A count of zero is accepted here and rejected by [`run`](Self::run).
    pub fn new(workers: usize) -> Self {
        Executor {
            workers,
            split: Split::Pixels,
        }
    }

    pub fn with_split(self, split: Split) -> Self {
        Executor { split, ..self }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn split(&self) -> Split {
        self.split
    }

    /// The ranges a run over `buffer` would dispatch, including empty ones.
    pub fn ranges<P: Channels>(&self, buffer: &PixelBuffer<P>) -> Result<Vec<Range>, LayoutError> {
        match self.split {
            Split::Pixels => partition(buffer.len(), self.workers),
            Split::Rows => partition_rows(buffer.width(), buffer.height(), self.workers),
        }
    }

    /// Convert `buffer` to grayscale in place.
    pub fn grayscale<P: Channels>(
        &self,
        buffer: &mut PixelBuffer<P>,
        luma: Luma,
    ) -> Result<(), ExecuteError> {
        self.run(buffer, move |rgb| luma.apply(rgb))
    }

    /// Apply `transform` to every pixel of `buffer` in place.
    ///
    /// Returns only once every started worker has finished. If a worker panics, the remaining
    /// workers still run to completion and are joined before the first failure is returned. The
    /// buffer then holds the results of all workers that did complete.
    pub fn run<P, F>(&self, buffer: &mut PixelBuffer<P>, transform: F) -> Result<(), ExecuteError>
    where
        P: Channels,
        F: Fn(Rgb) -> Rgb + Sync,
    {
        let ranges = self.ranges(buffer)?;
        log::trace!(
            "partitioned {} pixels into {:?} ({:?} split)",
            buffer.len(),
            ranges,
            self.split
        );

        let stripes = split_disjoint(buffer.as_mut_slice(), &ranges);
        let transform = &transform;

        thread::scope(|scope| {
            let mut workers = Vec::with_capacity(ranges.len());
            let mut spawn_error = None;

            for (index, (&range, stripe)) in ranges.iter().zip(stripes).enumerate() {
                if stripe.is_empty() {
                    continue;
                }

                let spawned = thread::Builder::new()
                    .name(format!("graysplit-worker-{index}"))
                    .spawn_scoped(scope, move || transform_stripe(stripe, transform));

                match spawned {
                    Ok(handle) => workers.push((index, range, handle)),
                    Err(source) => {
                        spawn_error = Some(ExecuteError::Spawn { index, source });
                        break;
                    }
                }
            }

            log::debug!("dispatched {} of {} workers", workers.len(), ranges.len());

            // Join everything, even past a failure, so that no worker outlives this call.
            let mut failure = None;
            for (index, range, handle) in workers {
                let Err(payload) = handle.join() else {
                    log::trace!("worker {index} completed {range:?}");
                    continue;
                };

                let message = panic_message(&*payload);
                if failure.is_some() {
                    log::debug!("discarding later failure of worker {index}: {message}");
                } else {
                    failure = Some(ExecuteError::WorkerPanic {
                        index,
                        range,
                        message,
                    });
                }
            }

            match failure.or(spawn_error) {
                Some(error) => Err(error),
                None => Ok(()),
            }
        })
    }
}

/// Apply `transform` to every pixel of `buffer` with `workers` threads, splitting by pixels.
///
/// See [`Executor::run`].
pub fn run<P, F>(buffer: &mut PixelBuffer<P>, workers: usize, transform: F) -> Result<(), ExecuteError>
where
    P: Channels,
    F: Fn(Rgb) -> Rgb + Sync,
{
    Executor::new(workers).run(buffer, transform)
}

fn transform_stripe<P, F>(stripe: &mut [P], transform: &F)
where
    P: Channels,
    F: Fn(Rgb) -> Rgb,
{
    for pixel in stripe {
        *pixel = P::from_rgb(transform(pixel.to_rgb()));
    }
}

/// Cut `pixels` into one exclusive sub-slice per range.
///
/// The ranges must be ordered, contiguous and start at zero, as produced by the partitioning
/// functions. Then the pieces are pairwise disjoint by construction of `split_at_mut`.
fn split_disjoint<'a, P>(mut pixels: &'a mut [P], ranges: &[Range]) -> Vec<&'a mut [P]> {
    debug_assert!(ranges.windows(2).all(|pair| pair[0].end == pair[1].start));

    let mut stripes = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (stripe, rest) = mem::take(&mut pixels).split_at_mut(range.len());
        stripes.push(stripe);
        pixels = rest;
    }

    stripes
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("opaque panic payload")
    }
}
