//! Error handling integration tests.
//!
//! These verify that meaningful errors are returned for the failure
//! conditions that need no video fixture.

use lastframe::{LastFrameError, VideoSource, extract_last_frame};

#[test]
fn open_nonexistent_file_fails_eagerly() {
    let result = VideoSource::open("this_file_does_not_exist.mp4");
    assert!(matches!(&result, Err(LastFrameError::NotFound { .. })));

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("not found"),
        "Error message should mention the missing file: {error_message}",
    );
}

#[test]
fn pipeline_rejects_nonexistent_file() {
    let result = extract_last_frame("missing_video.mp4", None);
    assert!(matches!(result, Err(LastFrameError::NotFound { .. })));
}

#[test]
fn open_invalid_file_exhausts_all_strategies() {
    // Create a temporary file with garbage content.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = VideoSource::open(&invalid_file_path);
    assert!(result.is_err(), "Expected error for invalid media file");

    // When the chain is exhausted, the error names each failed strategy.
    if let Err(LastFrameError::FileOpen { reason, .. }) = result {
        assert!(
            reason.contains("direct"),
            "Open error should carry per-strategy reasons: {reason}",
        );
    }
}

#[test]
fn invalid_file_produces_no_output() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("broken.mp4");
    std::fs::write(&invalid_file_path, b"\x00\x00\x00\x00garbage").expect("Failed to write file");

    let result = extract_last_frame(&invalid_file_path, None);
    assert!(result.is_err());

    let default_output = temporary_directory.path().join("broken_last_frame.png");
    assert!(
        !default_output.exists(),
        "No output file may be produced on failure",
    );
}
