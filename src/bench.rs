// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use std::time::{Duration, Instant};

use graysplit_canvas::{Executor, Luma};

use crate::format::Image;
use crate::report::Record;
use crate::Error;

pub const SEQUENTIAL_LABEL: &str = "Without Threads";
pub const PARALLEL_LABEL: &str = "With Threads";

/// Timings of the same conversion done on one thread and with a set of workers.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub sequential: Duration,
    pub parallel: Duration,
    pub workers: usize,
}

impl Comparison {
    /// How many times faster the parallel pass was.
    pub fn speedup(&self) -> f64 {
        let parallel = self.parallel.as_secs_f64();
        if parallel == 0.0 {
            return f64::INFINITY;
        }

        self.sequential.as_secs_f64() / parallel
    }

    /// The report lines, sequential pass first.
    pub fn records(&self) -> [Record; 2] {
        [
            Record::new(SEQUENTIAL_LABEL, self.sequential),
            Record::new(PARALLEL_LABEL, self.parallel),
        ]
    }
}

/// Convert copies of `image` once on the calling thread and once with `executor`.
///
/// Both passes start from the same pixels. Returns the timings and the parallel result.
pub fn compare(image: &Image, executor: &Executor, luma: Luma) -> Result<(Comparison, Image), Error> {
    let mut sequential = image.clone();
    let start = Instant::now();
    sequential.grayscale_sequential(luma);
    let sequential_elapsed = start.elapsed();
    log::info!("{SEQUENTIAL_LABEL}: {sequential_elapsed:?}");

    let mut parallel = image.clone();
    let start = Instant::now();
    parallel.grayscale(executor, luma)?;
    let parallel_elapsed = start.elapsed();
    log::info!(
        "{PARALLEL_LABEL} ({} workers): {parallel_elapsed:?}",
        executor.workers()
    );

    if parallel != sequential {
        log::warn!("parallel and sequential results differ");
    }

    let comparison = Comparison {
        sequential: sequential_elapsed,
        parallel: parallel_elapsed,
        workers: executor.workers(),
    };

    Ok((comparison, parallel))
}
