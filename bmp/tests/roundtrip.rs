use graysplit_bmp::{decode, encode, gradient, open, read, save, write, BmpError, Header};
use graysplit_texel::{Bgr, PixelBuffer};
use proptest::prelude::*;

fn image_strategy() -> impl Strategy<Value = PixelBuffer<Bgr>> {
    (0usize..24, 0usize..24).prop_flat_map(|(width, height)| {
        proptest::collection::vec(any::<[u8; 3]>(), width * height).prop_map(move |pixels| {
            let pixels = pixels
                .into_iter()
                .map(|[b, g, r]| Bgr { b, g, r })
                .collect();
            PixelBuffer::from_pixels(width, height, pixels).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(image in image_strategy()) {
        let bytes = encode(&image).unwrap();
        let stride = (image.width() * 3 + 3) / 4 * 4;
        prop_assert_eq!(bytes.len(), 54 + stride * image.height());
        prop_assert_eq!(decode(&bytes).unwrap(), image);
    }
}

#[test]
fn top_down_files() {
    let image = gradient(7, 3).unwrap();
    let mut bytes = encode(&image).unwrap();

    // Flip the stored row order and mark the file as top-down.
    let stride = Header::new(7, 3).stride().unwrap();
    let rows: Vec<Vec<u8>> = bytes[54..].chunks(stride).rev().map(<[u8]>::to_vec).collect();
    bytes.truncate(54);
    bytes.extend(rows.concat());
    bytes[22..26].copy_from_slice(&(-3i32).to_le_bytes());

    assert_eq!(decode(&bytes).unwrap(), image);
}

#[test]
fn extended_info_header() {
    // A file with a 124 byte header, pixel data following at offset 138.
    let image = gradient(3, 2).unwrap();
    let plain = encode(&image).unwrap();

    let mut bytes = plain[..54].to_vec();
    bytes[10..14].copy_from_slice(&138u32.to_le_bytes());
    bytes[14..18].copy_from_slice(&124u32.to_le_bytes());
    bytes.resize(138, 0);
    bytes.extend_from_slice(&plain[54..]);

    assert_eq!(decode(&bytes).unwrap(), image);
}

#[test]
fn reader_and_writer() {
    let image = gradient(9, 4).unwrap();
    let mut bytes = Vec::new();
    write(&mut bytes, &image).unwrap();
    assert_eq!(read(bytes.as_slice()).unwrap(), image);
}

#[test]
fn files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.bmp");

    let image = gradient(256, 256).unwrap();
    save(&path, &image).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 54 + 256 * 256 * 3);
    assert_eq!(open(&path).unwrap(), image);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let error = open(dir.path().join("missing.bmp")).unwrap_err();
    assert!(matches!(error, BmpError::Io(_)));
}

#[test]
fn not_a_bitmap() {
    let bytes = [0x89u8; 64];
    assert!(matches!(decode(&bytes), Err(BmpError::Signature(_))));
}

#[test]
fn pixel_offset_inside_header() {
    let mut bytes = encode(&gradient(2, 2).unwrap()).unwrap();
    bytes[10..14].copy_from_slice(&0u32.to_le_bytes());
    assert!(matches!(decode(&bytes), Err(BmpError::PixelOffset(0))));

    // An extended info header ending past the stated offset.
    let mut bytes = encode(&gradient(2, 2).unwrap()).unwrap();
    bytes[14..18].copy_from_slice(&124u32.to_le_bytes());
    assert!(matches!(decode(&bytes), Err(BmpError::PixelOffset(54))));
}
