// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers

/// Worker count used when the platform does not report its parallelism.
pub const DEFAULT_WORKERS: usize = 4;

/// The worker count for a run: the requested one, or one per hardware thread.
pub fn resolve(requested: Option<usize>) -> usize {
    match requested {
        Some(workers) => workers,
        None => hardware(),
    }
}

/// One worker per logical CPU, falling back to [`DEFAULT_WORKERS`].
pub fn hardware() -> usize {
    or_default(num_cpus::get())
}

fn or_default(reported: usize) -> usize {
    if reported == 0 {
        log::warn!("no hardware threads reported, using {DEFAULT_WORKERS} workers");
        DEFAULT_WORKERS
    } else {
        reported
    }
}
