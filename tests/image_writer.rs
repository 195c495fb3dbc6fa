//! Image writer tests.
//!
//! The buffered fallback is exercised directly, which is the situation
//! where the direct save cannot handle the destination path.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use lastframe::{encode_to_buffer, format_for_path, write_image, write_via_buffer};

fn test_image() -> DynamicImage {
    let mut rgb = RgbImage::new(64, 48);
    for (x, y, pixel) in rgb.enumerate_pixels_mut() {
        *pixel = image::Rgb([x as u8, y as u8, 128]);
    }
    DynamicImage::ImageRgb8(rgb)
}

#[test]
fn format_from_extension() {
    assert_eq!(format_for_path(Path::new("out.jpg")), ImageFormat::Jpeg);
    assert_eq!(format_for_path(Path::new("out.jpeg")), ImageFormat::Jpeg);
    assert_eq!(format_for_path(Path::new("out.png")), ImageFormat::Png);
    assert_eq!(format_for_path(Path::new("out.bmp")), ImageFormat::Bmp);

    // Missing or unrecognised extensions default to PNG.
    assert_eq!(format_for_path(Path::new("out")), ImageFormat::Png);
    assert_eq!(format_for_path(Path::new("out.xyz")), ImageFormat::Png);
}

#[test]
fn buffered_write_produces_decodable_png() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let target = directory.path().join("frame.png");

    write_via_buffer(&test_image(), &target).expect("Buffered write failed");

    let decoded = image::open(&target).expect("Output is not a decodable image");
    assert_eq!(decoded.dimensions(), (64, 48));
}

#[test]
fn buffered_write_produces_decodable_jpeg() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let target = directory.path().join("frame.jpg");

    write_via_buffer(&test_image(), &target).expect("Buffered write failed");

    let decoded = image::open(&target).expect("Output is not a decodable JPEG");
    assert_eq!(decoded.dimensions(), (64, 48));
}

#[test]
fn buffered_write_handles_non_ascii_path() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let target = directory.path().join("测试视频_last_frame.png");

    write_via_buffer(&test_image(), &target).expect("Buffered write to non-ASCII path failed");

    assert!(target.exists());
    let decoded = image::open(&target).expect("Output is not a decodable image");
    assert_eq!(decoded.dimensions(), (64, 48));
}

#[test]
fn encode_to_buffer_round_trips_dimensions() {
    let bytes = encode_to_buffer(&test_image(), ImageFormat::Jpeg).expect("Encode failed");
    assert!(!bytes.is_empty());

    let decoded = image::load_from_memory(&bytes).expect("Buffer is not a decodable image");
    assert_eq!(decoded.dimensions(), (64, 48));
}

#[test]
fn write_chain_succeeds_for_plain_path() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let target = directory.path().join("plain.png");

    write_image(&test_image(), &target).expect("Write chain failed");

    let decoded = image::open(&target).expect("Output is not a decodable image");
    assert_eq!(decoded.dimensions(), (64, 48));
}

#[test]
fn write_chain_silently_overwrites() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let target = directory.path().join("existing.png");
    std::fs::write(&target, b"stale bytes").expect("Failed to seed existing file");

    write_image(&test_image(), &target).expect("Write chain failed");

    let decoded = image::open(&target).expect("Output was not replaced with a valid image");
    assert_eq!(decoded.dimensions(), (64, 48));
}
