//! Image writing with a path-safe fallback.
//!
//! The direct strategy hands the destination path to the `image` crate,
//! which infers the format from the extension. When that fails — unknown
//! extension, or a path the encoder's own file handling cannot open — the
//! frame is encoded into an in-memory buffer and the bytes are written
//! through `std::fs`, whose path handling is Unicode-correct on every
//! platform.

use std::{error::Error, fs, io::Cursor, path::Path};

use image::{DynamicImage, ImageFormat};

use crate::error::LastFrameError;

/// Outcome of the direct write strategy.
enum WriteAttempt {
    Written,
    TryNext(String),
}

/// Write `image` to `path`, trying the direct save first and the in-memory
/// encode plus raw byte write second.
///
/// # Errors
///
/// Returns [`LastFrameError::FrameWrite`] when both strategies fail. The
/// buffer is written in a single call, so no partially written file is left
/// behind on failure.
pub fn write_image(image: &DynamicImage, path: &Path) -> Result<(), LastFrameError> {
    match try_direct_save(image, path) {
        WriteAttempt::Written => {
            log::debug!("Wrote image directly to {}", path.display());
            Ok(())
        }
        WriteAttempt::TryNext(reason) => {
            log::debug!(
                "Direct image write to {} failed ({reason}); falling back to in-memory encode",
                path.display()
            );
            write_via_buffer(image, path)
        }
    }
}

fn try_direct_save(image: &DynamicImage, path: &Path) -> WriteAttempt {
    match image.save(path) {
        Ok(()) => WriteAttempt::Written,
        Err(error) => WriteAttempt::TryNext(describe_image_error(&error)),
    }
}

/// Render an `image` crate error together with its source chain.
///
/// Causes whose text the outer message already carries are skipped, so the
/// result stays readable for variants that delegate their display to the
/// underlying error.
fn describe_image_error(error: &image::ImageError) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Determine the encode format from the output path's extension.
///
/// Unrecognised or missing extensions default to PNG.
pub fn format_for_path(path: &Path) -> ImageFormat {
    path.extension()
        .and_then(ImageFormat::from_extension)
        .unwrap_or(ImageFormat::Png)
}

/// Encode `image` for `path`'s extension into an in-memory buffer, then
/// write the whole buffer through `std::fs`.
///
/// This bypasses the encoder's own file opening entirely, which is what
/// makes writes to non-ASCII destination paths work on platforms whose
/// native file APIs mishandle them.
pub fn write_via_buffer(image: &DynamicImage, path: &Path) -> Result<(), LastFrameError> {
    let format = format_for_path(path);

    let bytes = encode_to_buffer(image, format).map_err(|error| LastFrameError::FrameWrite {
        path: path.to_path_buf(),
        reason: format!("in-memory {format:?} encode failed: {error}"),
    })?;

    fs::write(path, &bytes).map_err(|error| LastFrameError::FrameWrite {
        path: path.to_path_buf(),
        reason: format!("raw byte write failed: {error}"),
    })?;

    log::debug!(
        "Wrote {} bytes to {} via the buffered fallback",
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Encode `image` into an in-memory byte buffer using `format`.
pub fn encode_to_buffer(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, LastFrameError> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io;

    use image::ImageError;

    use super::describe_image_error;

    #[test]
    fn image_error_description_carries_the_cause() {
        let error = ImageError::IoError(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied by policy",
        ));
        let description = describe_image_error(&error);
        assert!(
            description.contains("denied by policy"),
            "Description should include the underlying cause: {description}",
        );
    }

    #[test]
    fn duplicated_cause_text_is_not_repeated() {
        let error = ImageError::IoError(io::Error::new(io::ErrorKind::Other, "single message"));
        let description = describe_image_error(&error);
        assert_eq!(
            description.matches("single message").count(),
            1,
            "Cause text already in the message must not be appended again: {description}",
        );
    }
}
