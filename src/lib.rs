//! # lastframe
//!
//! Extract the final decodable frame of a video file and save it as an
//! image, powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate and the
//! [`image`](https://crates.io/crates/image) crate for encoding.
//!
//! The pipeline itself is a thin sequential wrapper; the interesting part is
//! the defensive fallback behaviour:
//!
//! - **Opening** tries the default demuxer probe first, then explicit
//!   demuxer options, then — on Windows — the legacy 8.3 short-name alias,
//!   which sidesteps native path handling that mishandles non-ASCII (e.g.
//!   CJK) filenames.
//! - **Locating** the last frame seeks to the final frame index first and
//!   falls back to a sequential full scan for containers whose index lies
//!   (variable frame rate, corrupt indexes). The scan retains only one
//!   frame at a time, so memory stays constant in the video's length.
//! - **Writing** saves directly through the `image` crate and falls back to
//!   an in-memory encode plus a raw `std::fs` byte write for destination
//!   paths the encoder's own file handling cannot open.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lastframe::extract_last_frame;
//!
//! let saved = extract_last_frame("input.mp4", None).unwrap();
//! println!("saved to {}", saved.display());
//! ```
//!
//! ## Stage by stage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use lastframe::{VideoSource, resolve_output_path, write_image};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let frame = source.last_frame()?;
//! let target = resolve_output_path(Path::new("input.mp4"), None);
//! write_image(&frame, &target)?;
//! # Ok::<(), lastframe::LastFrameError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system; on
//! Windows see `build.rs` for the vcpkg discovery hints.

pub mod alias;
mod conversion;
pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod metadata;
mod opener;
pub mod output;
pub mod video;
pub mod writer;

#[cfg(windows)]
pub use alias::ShortPathAliasProvider;
pub use alias::{NoopAliasProvider, PathAliasProvider, platform_alias_provider};
pub use error::LastFrameError;
pub use extract::extract_last_frame;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use metadata::VideoMetadata;
pub use output::resolve_output_path;
pub use video::VideoSource;
pub use writer::{encode_to_buffer, format_for_path, write_image, write_via_buffer};
