// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use std::ffi::OsStr;
use std::path::Path;

use graysplit_canvas::{ExecuteError, Executor, Luma};
use graysplit_texel::{Bgr, PixelBuffer, Rgb};

use crate::Error;

/// A decoded image, in the channel order of the format it came from.
///
/// Bitmaps keep their blue-green-red layout so they are converted and written back without
/// reordering any bytes. All other formats are decoded to red-green-blue by the `image` crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Image {
    Bitmap(PixelBuffer<Bgr>),
    Rgb(PixelBuffer<Rgb>),
}

impl Image {
    /// Decode an image file, choosing the decoder by extension.
    pub fn open(path: &Path) -> Result<Self, Error> {
        if is_bitmap(path) {
            let image = graysplit_bmp::open(path).map_err(Error::bitmap(path))?;
            return Ok(Image::Bitmap(image));
        }

        let decoded = image::open(path).map_err(Error::image(path))?.into_rgb8();
        let (width, height) = decoded.dimensions();
        let image = PixelBuffer::from_bytes(width as usize, height as usize, decoded.as_raw())?;
        Ok(Image::Rgb(image))
    }

    /// Encode the image into a file, choosing the encoder by extension.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        match (self, is_bitmap(path)) {
            (Image::Bitmap(image), true) => {
                graysplit_bmp::save(path, image).map_err(Error::bitmap(path))
            }
            (Image::Rgb(image), true) => {
                graysplit_bmp::save(path, &image.convert()).map_err(Error::bitmap(path))
            }
            (Image::Bitmap(image), false) => save_rgb(path, &image.convert()),
            (Image::Rgb(image), false) => save_rgb(path, image),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Image::Bitmap(image) => image.width(),
            Image::Rgb(image) => image.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Image::Bitmap(image) => image.height(),
            Image::Rgb(image) => image.height(),
        }
    }

    /// Convert to grayscale on the calling thread.
    pub fn grayscale_sequential(&mut self, luma: Luma) {
        match self {
            Image::Bitmap(image) => luma.apply_slice(image.as_mut_slice()),
            Image::Rgb(image) => luma.apply_slice(image.as_mut_slice()),
        }
    }

    /// Convert to grayscale with the workers of `executor`.
    pub fn grayscale(&mut self, executor: &Executor, luma: Luma) -> Result<(), ExecuteError> {
        match self {
            Image::Bitmap(image) => executor.grayscale(image, luma),
            Image::Rgb(image) => executor.grayscale(image, luma),
        }
    }
}

impl From<PixelBuffer<Bgr>> for Image {
    fn from(image: PixelBuffer<Bgr>) -> Self {
        Image::Bitmap(image)
    }
}

impl From<PixelBuffer<Rgb>> for Image {
    fn from(image: PixelBuffer<Rgb>) -> Self {
        Image::Rgb(image)
    }
}

fn is_bitmap(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"))
}

fn save_rgb(path: &Path, image: &PixelBuffer<Rgb>) -> Result<(), Error> {
    let dimensions = || Error::Dimensions {
        width: image.width(),
        height: image.height(),
    };

    let width = u32::try_from(image.width()).map_err(|_| dimensions())?;
    let height = u32::try_from(image.height()).map_err(|_| dimensions())?;
    let buffer = image::RgbImage::from_raw(width, height, image.as_bytes().to_vec())
        .ok_or_else(dimensions)?;

    buffer.save(path).map_err(Error::image(path))
}
