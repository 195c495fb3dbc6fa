//! Error types for the `lastframe` crate.
//!
//! This module defines [`LastFrameError`], the unified error type returned by
//! all fallible operations in the crate. The opener and writer fallback
//! chains never surface their intermediate failures as errors; only the
//! exhaustion of a whole chain does, and the variant then carries the
//! per-strategy reasons for diagnosis.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `lastframe` operations.
///
/// Every public method that can fail returns `Result<T, LastFrameError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LastFrameError {
    /// The input path does not exist on the filesystem.
    ///
    /// Checked eagerly, before FFmpeg is asked to open anything, so a
    /// missing file never surfaces as an ambiguous demuxer error.
    #[error("Video file not found: {path}")]
    NotFound {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
    },

    /// Every opening strategy failed for this file.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Aggregated reasons from each exhausted strategy.
        reason: String,
    },

    /// The file opened but contains no video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// No frame could be obtained, either because the video reports zero
    /// frames or because neither the seek path nor the full scan decoded
    /// anything.
    #[error("Failed to read a video frame: {0}")]
    FrameRead(String),

    /// Both the direct write and the encode-plus-raw-write fallback failed.
    #[error("Failed to write image to {path}: {reason}")]
    FrameWrite {
        /// Destination path of the failed write.
        path: PathBuf,
        /// Underlying reason the write failed.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during frame conversion.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for LastFrameError {
    fn from(error: FfmpegError) -> Self {
        LastFrameError::FfmpegError(error.to_string())
    }
}
