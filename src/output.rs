//! Output path resolution.

use std::path::{Path, PathBuf};

/// Suffix appended to the video stem when no output path is given.
const DEFAULT_SUFFIX: &str = "_last_frame";

/// Resolve the output image path.
///
/// An explicit path is used verbatim. Otherwise the default is
/// `{video_directory}/{video_stem}_last_frame.png`, where the stem is the
/// video filename without its final extension. No existence check is
/// performed; an existing file at the target is silently overwritten.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
///
/// use lastframe::resolve_output_path;
///
/// let resolved = resolve_output_path(Path::new("clips/video.mp4"), None);
/// assert_eq!(resolved, PathBuf::from("clips/video_last_frame.png"));
/// ```
pub fn resolve_output_path(video_path: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(output) = explicit {
        return output.to_path_buf();
    }

    // Build the name as an OsString so non-UTF-8 stems survive untouched.
    let mut name = video_path.file_stem().unwrap_or_default().to_os_string();
    name.push(DEFAULT_SUFFIX);
    name.push(".png");
    video_path.with_file_name(name)
}
