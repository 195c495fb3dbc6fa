//! Platform path aliasing.
//!
//! Some FFmpeg builds on Windows fail to open files whose paths contain
//! non-ASCII (e.g. CJK) characters. The legacy 8.3 short name of such a path
//! contains only a restricted ASCII character set yet refers to the same
//! file, so retrying the open with the alias sidesteps the problem without
//! pre-encoding filenames or copying files.
//!
//! The capability is modelled as a [`PathAliasProvider`] trait object
//! selected once via [`platform_alias_provider`]; platforms without a
//! short-name mechanism get [`NoopAliasProvider`], which reports the feature
//! as unavailable rather than erroring.

use std::path::{Path, PathBuf};

/// Resolves a platform-specific alias for a filesystem path.
pub trait PathAliasProvider {
    /// Short provider name, used in log and error messages.
    fn name(&self) -> &'static str;

    /// Resolve `path` to its alias form.
    ///
    /// Returns `None` when the platform, the volume, or the specific path
    /// has no alias. This is "feature unavailable", not an error.
    fn short_alias(&self, path: &Path) -> Option<PathBuf>;
}

/// Alias provider for platforms with no short-name mechanism.
pub struct NoopAliasProvider;

impl PathAliasProvider for NoopAliasProvider {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn short_alias(&self, _path: &Path) -> Option<PathBuf> {
        None
    }
}

/// Resolves legacy 8.3 short names via `GetShortPathNameW`.
///
/// Short-name generation can be disabled per volume, in which case
/// resolution returns `None` and the opener moves on.
#[cfg(windows)]
pub struct ShortPathAliasProvider;

#[cfg(windows)]
impl PathAliasProvider for ShortPathAliasProvider {
    fn name(&self) -> &'static str {
        "windows-8.3"
    }

    fn short_alias(&self, path: &Path) -> Option<PathBuf> {
        use std::ffi::OsString;
        use std::os::windows::ffi::{OsStrExt, OsStringExt};

        use windows_sys::Win32::Storage::FileSystem::GetShortPathNameW;

        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        // First call sizes the buffer, second fills it. A zero return means
        // the path does not exist or the volume has no short names.
        let needed = unsafe { GetShortPathNameW(wide.as_ptr(), std::ptr::null_mut(), 0) };
        if needed == 0 {
            return None;
        }

        let mut buffer = vec![0u16; needed as usize];
        let written = unsafe { GetShortPathNameW(wide.as_ptr(), buffer.as_mut_ptr(), needed) };
        if written == 0 || written >= needed {
            return None;
        }

        buffer.truncate(written as usize);
        Some(PathBuf::from(OsString::from_wide(&buffer)))
    }
}

/// Select the alias provider for the current platform.
pub fn platform_alias_provider() -> Box<dyn PathAliasProvider> {
    #[cfg(windows)]
    return Box::new(ShortPathAliasProvider);
    #[cfg(not(windows))]
    return Box::new(NoopAliasProvider);
}
