//! Last-frame extraction tests.
//!
//! These need a real video; drop one at `tests/fixtures/sample_video.mp4`
//! to enable them. They pass vacuously when the fixture is absent.

use std::path::Path;

use image::GenericImageView;
use lastframe::{VideoSource, extract_last_frame, resolve_output_path};

const FIXTURE: &str = "tests/fixtures/sample_video.mp4";

#[test]
fn last_frame_matches_stream_dimensions() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let mut source = VideoSource::open(FIXTURE).expect("Failed to open test video");
    let width = source.metadata().width;
    let height = source.metadata().height;

    let frame = source.last_frame().expect("Failed to locate last frame");
    assert_eq!(frame.dimensions(), (width, height));
}

#[test]
fn repeated_extraction_is_byte_identical() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let mut source = VideoSource::open(FIXTURE).expect("Failed to open test video");
    let first = source.last_frame().expect("First extraction failed");
    let second = source.last_frame().expect("Second extraction failed");

    assert_eq!(
        first.as_bytes(),
        second.as_bytes(),
        "Locating the last frame twice must yield identical pixels",
    );
}

#[test]
fn pipeline_writes_default_output() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    // Copy the fixture into a scratch dir so the default output lands there.
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = directory.path().join("sample_video.mp4");
    std::fs::copy(FIXTURE, &video).expect("Failed to copy fixture");

    let saved = extract_last_frame(&video, None).expect("Extraction failed");
    assert_eq!(saved, resolve_output_path(&video, None));
    assert_eq!(
        saved.file_name().and_then(|name| name.to_str()),
        Some("sample_video_last_frame.png"),
    );

    let decoded = image::open(&saved).expect("Output is not a decodable image");
    assert!(decoded.width() > 0 && decoded.height() > 0);
}

#[test]
fn pipeline_honors_explicit_jpg_output() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("poster.jpg");

    let saved = extract_last_frame(FIXTURE, Some(&output)).expect("Extraction failed");
    assert_eq!(saved, output);

    let source = VideoSource::open(FIXTURE).expect("Failed to reopen test video");
    let decoded = image::open(&saved).expect("Output is not a decodable JPEG");
    assert_eq!(
        decoded.dimensions(),
        (source.metadata().width, source.metadata().height),
    );
}

#[test]
fn pipeline_writes_to_non_ascii_output_path() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("最后一帧.png");

    let saved = extract_last_frame(FIXTURE, Some(&output)).expect("Extraction failed");
    assert!(saved.exists());

    let decoded = image::open(&saved).expect("Output is not a decodable image");
    assert!(decoded.width() > 0);
}
