use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_frame_dimensions_and_premul() {
    let frame = decode_frame(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((frame.width, frame.height), (1, 1));
    assert_eq!(
        frame.pixmap.data_as_u8_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_frame_reports_natural_size() {
    let frame = decode_frame(&png_bytes(16, 9, [0, 0, 0, 255])).unwrap();
    assert_eq!(frame.natural_size(), Size::new(16.0, 9.0));
}

#[test]
fn decode_frame_rejects_garbage() {
    assert!(decode_frame(b"not an image").is_err());
}

#[test]
fn from_premul_rejects_length_mismatch() {
    assert!(PreparedFrame::from_premul_rgba8(&[0; 7], 1, 2).is_err());
    assert!(PreparedFrame::from_premul_rgba8(&[0; 8], 1, 2).is_ok());
}
