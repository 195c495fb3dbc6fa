//! Output path resolution tests.

use std::path::{Path, PathBuf};

use lastframe::resolve_output_path;

#[test]
fn default_name_derives_from_video_stem() {
    let resolved = resolve_output_path(Path::new("video.mp4"), None);
    assert_eq!(resolved, PathBuf::from("video_last_frame.png"));
}

#[test]
fn default_name_stays_in_video_directory() {
    let resolved = resolve_output_path(Path::new("/media/clips/video.mp4"), None);
    assert_eq!(resolved, PathBuf::from("/media/clips/video_last_frame.png"));
}

#[test]
fn explicit_path_used_verbatim() {
    let explicit = Path::new("out/poster.jpg");
    let resolved = resolve_output_path(Path::new("/media/video.mp4"), Some(explicit));
    assert_eq!(resolved, PathBuf::from("out/poster.jpg"));
}

#[test]
fn non_ascii_stem_preserved() {
    let resolved = resolve_output_path(Path::new("/媒体/测试视频.mp4"), None);
    assert_eq!(resolved, PathBuf::from("/媒体/测试视频_last_frame.png"));
}

#[test]
fn extensionless_input_still_gets_png_default() {
    let resolved = resolve_output_path(Path::new("/media/clip"), None);
    assert_eq!(resolved, PathBuf::from("/media/clip_last_frame.png"));
}

#[test]
fn only_final_extension_is_dropped() {
    let resolved = resolve_output_path(Path::new("backup.2024.mp4"), None);
    assert_eq!(resolved, PathBuf::from("backup.2024_last_frame.png"));
}
