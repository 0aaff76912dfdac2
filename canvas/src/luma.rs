use graysplit_texel::{Channels, Rgb};

/// The fixed-point scale of luma weights, per mille.
pub const WEIGHT_SCALE: u32 = 1000;

/// Primary weights of a luma computation, in units of `1 / WEIGHT_SCALE`.
///
/// The weights always sum to exactly [`WEIGHT_SCALE`]. This keeps white at full intensity and
/// makes every neutral pixel a fixed point of the conversion, independent of rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Weights {
    red: u32,
    green: u32,
    blue: u32,
}

/// How the fractional part of a weighted sum is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round half up to the nearest integer.
    #[default]
    Nearest,
    /// Floor of the exact weighted sum.
    Truncate,
}

/// Converts color pixels into neutral pixels of equal luma.
///
/// Each pixel is converted independently of every other, so any partition of an image can be
/// processed concurrently without synchronization.
///
/// ```
/// use graysplit_canvas::{Luma, Rounding, Weights};
/// use graysplit_texel::Rgb;
///
/// let luma = Luma::default();
/// assert_eq!(luma.apply(Rgb::new(0, 255, 0)), Rgb::gray(150));
///
/// let floor = Luma::new(Weights::BT601, Rounding::Truncate);
/// assert_eq!(floor.apply(Rgb::new(0, 255, 0)), Rgb::gray(149));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Luma {
    weights: Weights,
    rounding: Rounding,
}

impl Weights {
    /// ITU-R BT.601 weights, `0.299 R + 0.587 G + 0.114 B`.
    pub const BT601: Self = Weights {
        red: 299,
        green: 587,
        blue: 114,
    };

    /// The rounded weights `0.30 R + 0.59 G + 0.11 B` of older tools.
    pub const LEGACY: Self = Weights {
        red: 300,
        green: 590,
        blue: 110,
    };

    /// Custom weights, per mille. Returns `None` unless they sum to [`WEIGHT_SCALE`].
    pub const fn new(red: u32, green: u32, blue: u32) -> Option<Self> {
        match red.checked_add(green) {
            Some(rg) => match rg.checked_add(blue) {
                Some(WEIGHT_SCALE) => Some(Weights { red, green, blue }),
                _ => None,
            },
            None => None,
        }
    }

    pub fn red(&self) -> u32 {
        self.red
    }

    pub fn green(&self) -> u32 {
        self.green
    }

    pub fn blue(&self) -> u32 {
        self.blue
    }

    fn weighted_sum(&self, rgb: Rgb) -> u32 {
        self.red * u32::from(rgb.r) + self.green * u32::from(rgb.g) + self.blue * u32::from(rgb.b)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::BT601
    }
}

impl Luma {
    pub const fn new(weights: Weights, rounding: Rounding) -> Self {
        Luma { weights, rounding }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// The luma of a pixel.
    #[inline]
    pub fn gray(&self, rgb: Rgb) -> u8 {
        let sum = self.weights.weighted_sum(rgb);
        let sum = match self.rounding {
            Rounding::Nearest => sum + WEIGHT_SCALE / 2,
            Rounding::Truncate => sum,
        };

        // The weights sum to the scale, so the quotient is at most 255 even when rounding up.
        (sum / WEIGHT_SCALE) as u8
    }

    /// Convert one pixel to the neutral pixel of the same luma.
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        Rgb::gray(self.gray(rgb))
    }

    /// Convert a sequence of pixel records in place, on the calling thread.
    pub fn apply_slice<P: Channels>(&self, pixels: &mut [P]) {
        for pixel in pixels {
            *pixel = P::from_rgb(self.apply(pixel.to_rgb()));
        }
    }
}
