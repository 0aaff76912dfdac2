// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use std::io;
use std::path::PathBuf;

use graysplit_bmp::BmpError;
use graysplit_canvas::ExecuteError;
use graysplit_texel::LayoutError;

/// A benchmark run failed.
///
/// Input and output failures are reported as they happen, nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("bitmap {} could not be processed", path.display())]
    Bitmap {
        path: PathBuf,
        #[source]
        source: BmpError,
    },
    #[error("image {} could not be processed", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("a {width}x{height} image exceeds the limits of the output format")]
    Dimensions { width: usize, height: usize },
    #[error(transparent)]
    Execute(#[from] ExecuteError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }

    pub(crate) fn bitmap(path: impl Into<PathBuf>) -> impl FnOnce(BmpError) -> Self {
        let path = path.into();
        move |source| Error::Bitmap { path, source }
    }

    pub(crate) fn image(path: impl Into<PathBuf>) -> impl FnOnce(image::ImageError) -> Self {
        let path = path.into();
        move |source| Error::Image { path, source }
    }
}
