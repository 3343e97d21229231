//! Decode regression test
//!
//! Encodes synthetic buffers in every supported format, decodes them back,
//! and checks that malformed input is reported as a decode failure.

use goldenpix_io::{
    ImageFormat, IoError, read_image, read_image_mem, read_image_sampled, write_image,
    write_image_mem,
};
use goldenpix_test::{RegParams, fixtures};

#[test]
fn decode_reg() {
    let mut rp = RegParams::new("decode");
    let grad = fixtures::gradient(40, 30);

    // --- Test 1: Lossless formats round trip exactly ---
    for format in [ImageFormat::Png, ImageFormat::Bmp] {
        let bytes = write_image_mem(&grad, format).expect("encode");
        let back = read_image_mem(&bytes).expect("decode");
        rp.compare_pix(&grad, &back);
    }

    // --- Test 2: JPEG keeps dimensions ---
    let bytes = write_image_mem(&grad, ImageFormat::Jpeg).expect("encode jpeg");
    let back = read_image_mem(&bytes).expect("decode jpeg");
    rp.compare_values(40.0, back.width() as f64, 0.0);
    rp.compare_values(30.0, back.height() as f64, 0.0);

    // --- Test 3: Malformed bytes are a decode failure ---
    let garbage = read_image_mem(b"\x00\x01\x02\x03 this is not an image");
    let failed = matches!(&garbage, Err(e) if e.is_decode_failure());
    rp.compare_values(1.0, if failed { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: A valid signature followed by junk is a decode failure ---
    let mut truncated = fixtures::png_bytes(&grad);
    truncated.truncate(40);
    let failed = matches!(read_image_mem(&truncated), Err(e) if e.is_decode_failure());
    rp.compare_values(1.0, if failed { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: File round trip and sampled read ---
    let dir = tempfile::tempdir().expect("tempdir");
    let big = fixtures::gradient(2000, 1200);
    let path = dir.path().join("big.png");
    write_image(&big, &path, ImageFormat::Png).expect("write file");
    let full = read_image(&path).expect("read file");
    rp.compare_pix(&big, &full);
    let sampled = read_image_sampled(&path, 500, 500).expect("sampled read");
    rp.compare_values(1000.0, sampled.width() as f64, 0.0);
    rp.compare_values(600.0, sampled.height() as f64, 0.0);

    // --- Test 6: Missing files surface as I/O errors ---
    let missing = read_image(dir.path().join("missing.png"));
    let is_io = matches!(missing, Err(IoError::Io(_)));
    rp.compare_values(1.0, if is_io { 1.0 } else { 0.0 }, 0.0);

    // --- Test 7: Absurd BMP dimensions are rejected before allocating ---
    let mut header = Vec::new();
    header.extend_from_slice(b"BM");
    header.extend_from_slice(&62u32.to_le_bytes());
    header.extend_from_slice(&[0; 4]);
    header.extend_from_slice(&62u32.to_le_bytes());
    header.extend_from_slice(&40u32.to_le_bytes());
    header.extend_from_slice(&i32::MAX.to_le_bytes());
    header.extend_from_slice(&i32::MIN.to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes());
    header.extend_from_slice(&[0; 16]);
    header.extend_from_slice(&2u32.to_le_bytes());
    header.extend_from_slice(&[0; 4]);
    header.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
    rp.compare_values(62.0, header.len() as f64, 0.0);
    let failed = matches!(read_image_mem(&header), Err(e) if e.is_decode_failure());
    rp.compare_values(1.0, if failed { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "decode regression test failed");
}
