// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use bytemuck::{Pod, Zeroable};

/// A pixel record with red, green and blue channels of 8 bits each.
///
/// Implementors differ only in the order their channels occupy in memory. The conversion to and
/// from [`Rgb`] is the semantic view shared by all of them, a transform written against `Rgb`
/// applies to any record.
///
/// The `Pod` bound certifies that a slice of records can be reinterpreted as bytes and back. This
/// is what allows a codec to read rows straight into the buffer.
pub trait Channels: Pod + Send + Sync {
    /// The semantic value of this record.
    fn to_rgb(self) -> Rgb;

    /// Store a semantic value in this record's channel order.
    fn from_rgb(rgb: Rgb) -> Self;
}

/// A pixel stored in red, green, blue order.
///
/// This is the order produced by most decoders, including PNG and JPEG.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A pixel stored in blue, green, red order.
///
/// Bitmap files lay out their 24-bit pixels this way. The semantic channels are the same as for
/// [`Rgb`], only their byte offsets are inverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Rgb {
    pub const BLACK: Self = Rgb::gray(0);
    pub const WHITE: Self = Rgb::gray(0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// A neutral pixel, all channels equal to `value`.
    pub const fn gray(value: u8) -> Self {
        Rgb {
            r: value,
            g: value,
            b: value,
        }
    }

    /// Whether all channels are equal.
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl Bgr {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Bgr { b, g, r }
    }
}

impl Channels for Rgb {
    #[inline]
    fn to_rgb(self) -> Rgb {
        self
    }

    #[inline]
    fn from_rgb(rgb: Rgb) -> Self {
        rgb
    }
}

impl Channels for Bgr {
    #[inline]
    fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    #[inline]
    fn from_rgb(rgb: Rgb) -> Self {
        Bgr::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Bgr> for Rgb {
    fn from(bgr: Bgr) -> Rgb {
        bgr.to_rgb()
    }
}

impl From<Rgb> for Bgr {
    fn from(rgb: Rgb) -> Bgr {
        Bgr::from_rgb(rgb)
    }
}
