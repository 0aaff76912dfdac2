// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use crate::BmpError;

/// Size of the file header, `BITMAPFILEHEADER`.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of the smallest supported info header, `BITMAPINFOHEADER`.
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the pixel data in files written by this crate.
pub const PIXEL_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const SIGNATURE: [u8; 2] = *b"BM";
const BITS_PER_PIXEL: u16 = 24;
const BYTES_PER_PIXEL: usize = 3;
/// `BI_RGB`, no compression.
const COMPRESSION_NONE: u32 = 0;

/// The fields of a bitmap header relevant for 24-bit images.
///
/// Later header versions (`BITMAPV4HEADER`, `BITMAPV5HEADER`) extend the info header without
/// moving any of these fields, they are read the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub width: usize,
    pub height: usize,
    /// Rows are stored bottom row first, the common case signalled by a positive height.
    pub bottom_up: bool,
    /// Byte offset of the first row.
    pub pixel_offset: usize,
}

impl Header {
    /// A header for writing a bottom-up image.
    pub fn new(width: usize, height: usize) -> Self {
        Header {
            width,
            height,
            bottom_up: true,
            pixel_offset: PIXEL_OFFSET,
        }
    }

    /// Bytes per row, including the padding to a multiple of four.
    pub fn stride(&self) -> Result<usize, BmpError> {
        self.width
            .checked_mul(BYTES_PER_PIXEL)
            .and_then(|row| row.checked_next_multiple_of(4))
            .ok_or(BmpError::Dimensions {
                width: self.width,
                height: self.height,
            })
    }

    /// Bytes of pixel data, all rows including padding.
    pub fn image_len(&self) -> Result<usize, BmpError> {
        self.stride()?
            .checked_mul(self.height)
            .ok_or(BmpError::Dimensions {
                width: self.width,
                height: self.height,
            })
    }

    /// Parse the file and info header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, BmpError> {
        if bytes.len() < PIXEL_OFFSET {
            return Err(BmpError::Truncated {
                len: bytes.len(),
                expected: PIXEL_OFFSET,
            });
        }

        let signature = [bytes[0], bytes[1]];
        if signature != SIGNATURE {
            return Err(BmpError::Signature(signature));
        }

        let pixel_offset = read_u32(bytes, 10) as usize;
        let info_len = read_u32(bytes, 14);
        if (info_len as usize) < INFO_HEADER_LEN {
            return Err(BmpError::InfoHeader(info_len));
        }

        if pixel_offset < FILE_HEADER_LEN.saturating_add(info_len as usize) {
            return Err(BmpError::PixelOffset(pixel_offset));
        }

        let width = read_i32(bytes, 18);
        let height = read_i32(bytes, 22);
        let bits = read_u16(bytes, 28);
        let compression = read_u32(bytes, 30);

        if bits != BITS_PER_PIXEL {
            return Err(BmpError::BitDepth(bits));
        }

        if compression != COMPRESSION_NONE {
            return Err(BmpError::Compression(compression));
        }

        let Ok(width) = usize::try_from(width) else {
            return Err(BmpError::Dimensions {
                width: width.unsigned_abs() as usize,
                height: height.unsigned_abs() as usize,
            });
        };

        Ok(Header {
            width,
            height: height.unsigned_abs() as usize,
            bottom_up: height >= 0,
            pixel_offset,
        })
    }

    /// Serialize the file and info header, `PIXEL_OFFSET` bytes.
    pub fn to_bytes(&self) -> Result<[u8; PIXEL_OFFSET], BmpError> {
        let dimensions = || BmpError::Dimensions {
            width: self.width,
            height: self.height,
        };

        let width = i32::try_from(self.width).map_err(|_| dimensions())?;
        let height = i32::try_from(self.height).map_err(|_| dimensions())?;
        let height = if self.bottom_up { height } else { -height };
        let image_len = u32::try_from(self.image_len()?).map_err(|_| dimensions())?;
        let file_len = image_len
            .checked_add(PIXEL_OFFSET as u32)
            .ok_or_else(dimensions)?;

        let mut header = [0u8; PIXEL_OFFSET];
        header[..2].copy_from_slice(&SIGNATURE);
        header[2..6].copy_from_slice(&file_len.to_le_bytes());
        // Two reserved u16 remain zero.
        header[10..14].copy_from_slice(&(PIXEL_OFFSET as u32).to_le_bytes());

        header[14..18].copy_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
        header[18..22].copy_from_slice(&width.to_le_bytes());
        header[22..26].copy_from_slice(&height.to_le_bytes());
        header[26..28].copy_from_slice(&1u16.to_le_bytes());
        header[28..30].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        header[30..34].copy_from_slice(&COMPRESSION_NONE.to_le_bytes());
        header[34..38].copy_from_slice(&image_len.to_le_bytes());
        // Resolution and palette fields remain zero.

        Ok(header)
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    read_u32(bytes, at) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_padded() {
        assert_eq!(Header::new(1, 1).stride().unwrap(), 4);
        assert_eq!(Header::new(4, 1).stride().unwrap(), 12);
        assert_eq!(Header::new(5, 1).stride().unwrap(), 16);
        assert_eq!(Header::new(256, 256).image_len().unwrap(), 256 * 256 * 3);
    }

    #[test]
    fn written_fields() {
        let bytes = Header::new(3, 2).to_bytes().unwrap();
        assert_eq!(&bytes[..2], b"BM");
        // 2 rows of 9 bytes padded to 12.
        assert_eq!(read_u32(&bytes, 2), 54 + 24);
        assert_eq!(read_u32(&bytes, 10), 54);
        assert_eq!(read_i32(&bytes, 18), 3);
        assert_eq!(read_i32(&bytes, 22), 2);
        assert_eq!(read_u16(&bytes, 26), 1);
        assert_eq!(read_u16(&bytes, 28), 24);
        assert_eq!(read_u32(&bytes, 34), 24);
    }

    #[test]
    fn parse_written() {
        let header = Header::new(7, 5);
        assert_eq!(Header::parse(&header.to_bytes().unwrap()).unwrap(), header);
    }

    #[test]
    fn top_down() {
        let header = Header {
            bottom_up: false,
            ..Header::new(2, 3)
        };
        let bytes = header.to_bytes().unwrap();
        assert_eq!(read_i32(&bytes, 22), -3);
        assert_eq!(Header::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn rejects_other_formats() {
        let mut bytes = Header::new(2, 2).to_bytes().unwrap();
        bytes[28] = 32;
        assert!(matches!(Header::parse(&bytes), Err(BmpError::BitDepth(32))));

        let mut bytes = Header::new(2, 2).to_bytes().unwrap();
        bytes[30] = 1;
        assert!(matches!(Header::parse(&bytes), Err(BmpError::Compression(1))));

        let mut bytes = Header::new(2, 2).to_bytes().unwrap();
        bytes[14] = 12;
        assert!(matches!(Header::parse(&bytes), Err(BmpError::InfoHeader(12))));

        let mut bytes = Header::new(2, 2).to_bytes().unwrap();
        bytes[..2].copy_from_slice(b"PK");
        assert!(matches!(Header::parse(&bytes), Err(BmpError::Signature([b'P', b'K']))));
    }

    #[test]
    fn negative_width() {
        let mut bytes = Header::new(2, 2).to_bytes().unwrap();
        bytes[18..22].copy_from_slice(&(-2i32).to_le_bytes());
        assert!(matches!(
            Header::parse(&bytes),
            Err(BmpError::Dimensions { width: 2, height: 2 })
        ));
    }

    #[test]
    fn short_header() {
        assert!(matches!(
            Header::parse(b"BM"),
            Err(BmpError::Truncated {
                len: 2,
                expected: 54
            })
        ));
    }
}
