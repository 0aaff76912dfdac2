// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
//! Benchmark of parallel grayscale conversion.
//!
//! A run loads an image, or generates and stores a gradient when no input is configured, converts
//! it to grayscale once on the calling thread and once with a set of worker threads, writes the
//! parallel result and records both timings in a report file.
//!
//! ```no_run
//! use graysplit::Config;
//!
//! let config = Config {
//!     workers: Some(8),
//!     ..Config::default()
//! };
//!
//! let comparison = graysplit::run(&config)?;
//! println!("{:.2}x faster", comparison.speedup());
//! # Ok::<(), graysplit::Error>(())
//! ```
#![deny(unsafe_code)]

pub mod bench;
mod cli;
pub mod config;
mod error;
mod format;
pub mod report;
pub mod workers;

pub use self::bench::Comparison;
pub use self::cli::Cli;
pub use self::config::Config;
pub use self::error::Error;
pub use self::format::Image;

/// Perform a complete benchmark run as configured.
pub fn run(config: &Config) -> Result<Comparison, Error> {
    let luma = config.luma();
    let executor = config.executor();

    let input = match &config.input {
        Some(path) => path.as_path(),
        None => {
            let gradient = graysplit_bmp::gradient(config.width, config.height)?;
            Image::from(gradient).save(&config.generated)?;
            log::info!(
                "{}x{} gradient generated and saved to {}",
                config.width,
                config.height,
                config.generated.display()
            );
            config.generated.as_path()
        }
    };

    let image = Image::open(input)?;
    log::info!(
        "loaded {}x{} image from {}",
        image.width(),
        image.height(),
        input.display()
    );

    let (comparison, output) = bench::compare(&image, &executor, luma)?;

    output.save(&config.output)?;
    log::info!("image processed and saved to {}", config.output.display());

    report::save(&config.report, &comparison.records())?;
    log::info!(
        "timings written to {}, speedup {:.2}",
        config.report.display(),
        comparison.speedup()
    );

    Ok(comparison)
}
