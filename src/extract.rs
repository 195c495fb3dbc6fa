//! The extraction pipeline.
//!
//! Ties the stages together: validate the input path, open the video,
//! locate the last frame, resolve the output path, write the image. Each
//! stage is independently available from its own module for callers that
//! want to intervene between steps.

use std::path::{Path, PathBuf};

use crate::{error::LastFrameError, output, video::VideoSource, writer};

/// Extract the last decodable frame of `video_path` and write it to an
/// image file.
///
/// When `output_path` is `None` the image lands next to the video as
/// `{stem}_last_frame.png`; an existing file at the target is silently
/// overwritten. Returns the path actually written.
///
/// # Errors
///
/// - [`LastFrameError::NotFound`] if the input path does not exist.
/// - [`LastFrameError::FileOpen`] if all opening strategies fail.
/// - [`LastFrameError::FrameRead`] if no frame can be decoded.
/// - [`LastFrameError::FrameWrite`] if both write strategies fail.
///
/// # Example
///
/// ```no_run
/// use lastframe::extract_last_frame;
///
/// let saved = extract_last_frame("video.mp4", None)?;
/// println!("saved to {}", saved.display());
/// # Ok::<(), lastframe::LastFrameError>(())
/// ```
pub fn extract_last_frame<P: AsRef<Path>>(
    video_path: P,
    output_path: Option<&Path>,
) -> Result<PathBuf, LastFrameError> {
    let video_path = video_path.as_ref();

    let mut source = VideoSource::open(video_path)?;
    let image = source.last_frame()?;

    // Release the demuxer before touching the filesystem.
    drop(source);

    let resolved = output::resolve_output_path(video_path, output_path);
    writer::write_image(&image, &resolved)?;

    log::info!("Saved last frame to {}", resolved.display());
    Ok(resolved)
}
