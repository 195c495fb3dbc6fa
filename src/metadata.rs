//! Video metadata types.
//!
//! Metadata is extracted once when the file is opened and cached for the
//! lifetime of the [`VideoSource`](crate::VideoSource).

/// Metadata for the best video stream of an opened file.
///
/// # Example
///
/// ```no_run
/// use lastframe::VideoSource;
///
/// let source = VideoSource::open("input.mp4").unwrap();
/// let metadata = source.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frames_per_second);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames as reported by the container, or estimated from
    /// duration and frame rate when the container does not say.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}
