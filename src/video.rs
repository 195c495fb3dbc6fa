//! The open video handle and last-frame location.
//!
//! [`VideoSource`] wraps an open FFmpeg demuxer context together with cached
//! stream metadata. [`VideoSource::last_frame`] implements the two-stage
//! locator: seek straight to the final frame index, and when that yields
//! nothing (variable-frame-rate content, corrupt indexes), fall back to a
//! sequential full scan that retains only the most recently decoded frame.

use std::path::Path;

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{
    alias::platform_alias_provider, conversion, error::LastFrameError, metadata::VideoMetadata,
    opener,
};

/// An open decode session bound to one video file.
///
/// Created via [`VideoSource::open`]. The underlying FFmpeg context is
/// released when the source is dropped, on every exit path.
///
/// # Example
///
/// ```no_run
/// use lastframe::VideoSource;
///
/// let mut source = VideoSource::open("input.mp4")?;
/// let frame = source.last_frame()?;
/// frame.save("last.png")?;
/// # Ok::<(), lastframe::LastFrameError>(())
/// ```
pub struct VideoSource {
    /// The opened FFmpeg input (demuxer) context.
    input_context: Input,
    /// Index of the best video stream.
    stream_index: usize,
    /// Cached metadata extracted at open time.
    metadata: VideoMetadata,
}

impl std::fmt::Debug for VideoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoSource")
            .field("stream_index", &self.stream_index)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for last-frame extraction.
    ///
    /// Verifies the path exists, initializes FFmpeg (idempotent), runs the
    /// opener fallback chain, locates the best video stream, and caches its
    /// metadata.
    ///
    /// # Errors
    ///
    /// - [`LastFrameError::NotFound`] if the path does not exist. This check
    ///   runs before FFmpeg is touched.
    /// - [`LastFrameError::FileOpen`] if every opening strategy failed.
    /// - [`LastFrameError::NoVideoStream`] if the file has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LastFrameError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LastFrameError::NotFound {
                path: path.to_path_buf(),
            });
        }

        ffmpeg_next::init().map_err(|error| LastFrameError::FileOpen {
            path: path.to_path_buf(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let alias_provider = platform_alias_provider();
        let input_context = opener::open_input(path, alias_provider.as_ref())?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(LastFrameError::NoVideoStream)?;
        let stream_index = stream.index();

        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        // Compute frames per second from the stream's average frame rate,
        // falling back to the nominal rate field.
        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        // The container-reported count is authoritative when present; many
        // containers omit it, in which case duration x fps is close enough
        // for locating the final frame.
        let container_frames = stream.frames();
        let duration_microseconds = input_context.duration();
        let frame_count = if container_frames > 0 {
            container_frames as u64
        } else if duration_microseconds > 0 && frames_per_second > 0.0 {
            (duration_microseconds as f64 / 1_000_000.0 * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            codec,
        };

        log::info!(
            "Opened video: {} ({}x{}, {:.2} fps, ~{} frames, codec={})",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            stream_index,
            metadata,
        })
    }

    /// Get a reference to the cached video metadata.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Decode and return the last decodable frame.
    ///
    /// Seeks to the timestamp of frame `N-1` first and decodes forward to
    /// the end of the stream, keeping only the most recently decoded frame.
    /// If the seek-based attempt produces nothing, the stream is rewound and
    /// scanned sequentially from the start with the same single-frame
    /// holder, so memory use stays constant in the length of the video.
    ///
    /// # Errors
    ///
    /// Returns [`LastFrameError::FrameRead`] if the video reports zero
    /// frames, or if neither the seek path nor the full scan decoded a
    /// frame.
    pub fn last_frame(&mut self) -> Result<DynamicImage, LastFrameError> {
        ensure_decodable_frame_count(self.metadata.frame_count)?;

        let target = self.metadata.frame_count - 1;
        let seeked = self.decode_tail(Some(target))?;
        if seeked.is_none() {
            log::debug!("Seek to frame {target} produced no frame; falling back to a full scan");
        }

        resolve_located_frame(seeked, || self.decode_tail(None))
    }

    /// Seek to `target_frame` (or rewind to the start when `None`), then
    /// decode forward to end of stream, retaining only the most recently
    /// decoded frame.
    ///
    /// Decode errors mid-stream end the scan rather than failing it:
    /// whatever was held up to that point is still the last decodable
    /// frame. A rejected seek returns `Ok(None)` so the caller can try the
    /// next strategy.
    fn decode_tail(
        &mut self,
        target_frame: Option<u64>,
    ) -> Result<Option<DynamicImage>, LastFrameError> {
        let seek_timestamp = match target_frame {
            Some(frame_number) => conversion::frame_number_to_seek_timestamp(
                frame_number,
                self.metadata.frames_per_second,
            ),
            None => 0,
        };

        if let Err(error) = self.input_context.seek(seek_timestamp, ..seek_timestamp) {
            log::debug!("Seek to timestamp {seek_timestamp} failed: {error}");
            return Ok(None);
        }

        let width = self.metadata.width;
        let height = self.metadata.height;
        let stream_index = self.stream_index;

        // Each attempt gets a fresh decoder; the previous one may have been
        // flushed to EOF.
        let stream = self
            .input_context
            .stream(stream_index)
            .ok_or(LastFrameError::NoVideoStream)?;
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let mut decoder = decoder_context.decoder().video()?;

        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        // Single overwrite-in-place holder: at most one converted frame is
        // alive at any point during the scan.
        let mut held: Option<DynamicImage> = None;
        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != stream_index {
                continue;
            }

            if decoder.send_packet(&packet).is_err() {
                break;
            }

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                if scaler.run(&decoded_frame, &mut rgb_frame).is_ok() {
                    if let Ok(image) = convert_frame_to_image(&rgb_frame, width, height) {
                        held = Some(image);
                    }
                }
            }
        }

        // Drain the decoder; the true final frame often only appears here.
        if decoder.send_eof().is_ok() {
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                if scaler.run(&decoded_frame, &mut rgb_frame).is_ok() {
                    if let Ok(image) = convert_frame_to_image(&rgb_frame, width, height) {
                        held = Some(image);
                    }
                }
            }
        }

        Ok(held)
    }
}

/// Reject videos whose cached frame count is zero.
///
/// A zero count means the container reported nothing and no duration-based
/// estimate was possible; seeking to frame `N-1` is meaningless then.
fn ensure_decodable_frame_count(frame_count: u64) -> Result<(), LastFrameError> {
    if frame_count == 0 {
        return Err(LastFrameError::FrameRead(
            "video reports zero frames (empty video or unsupported format)".to_string(),
        ));
    }
    Ok(())
}

/// Pick the final frame from the two locator strategies.
///
/// A frame held by the seek-based attempt is returned as-is and `full_scan`
/// never runs. Otherwise the scan supplies the frame, and an empty scan is
/// the terminal [`LastFrameError::FrameRead`].
fn resolve_located_frame<F>(
    seeked: Option<DynamicImage>,
    full_scan: F,
) -> Result<DynamicImage, LastFrameError>
where
    F: FnOnce() -> Result<Option<DynamicImage>, LastFrameError>,
{
    if let Some(image) = seeked {
        return Ok(image);
    }

    match full_scan()? {
        Some(image) => Ok(image),
        None => Err(LastFrameError::FrameRead(
            "no frame could be decoded by either seeking or scanning".to_string(),
        )),
    }
}

/// Convert a scaled RGB24 video frame to an [`image::DynamicImage`].
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Result<DynamicImage, LastFrameError> {
    let buffer = conversion::frame_to_rgb_buffer(rgb_frame, width, height);
    let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        LastFrameError::FrameRead(
            "failed to construct RGB image from decoded frame data".to_string(),
        )
    })?;
    Ok(DynamicImage::ImageRgb8(rgb_image))
}
