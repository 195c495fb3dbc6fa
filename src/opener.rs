//! Video opening strategies.
//!
//! An ordered fallback chain of increasing cost and compatibility; the first
//! strategy that yields an open demuxer context wins. A strategy that fails
//! is not an error, it is [`OpenAttempt::TryNext`]; only exhausting the whole
//! chain produces [`LastFrameError::FileOpen`].

use std::path::Path;

use ffmpeg_next::{Dictionary, format::context::Input};

use crate::{alias::PathAliasProvider, error::LastFrameError};

/// Outcome of a single opening strategy.
enum OpenAttempt {
    Opened(Input),
    TryNext(String),
}

/// Open `path`, trying each strategy in order.
///
/// The strategies are:
/// 1. direct open through the default demuxer probe;
/// 2. reopen with explicit demuxer options for containers that fail the
///    default probe;
/// 3. resolve the path to its platform short alias and retry the direct
///    open (skipped silently where the platform has no alias mechanism).
pub(crate) fn open_input(
    path: &Path,
    alias_provider: &dyn PathAliasProvider,
) -> Result<Input, LastFrameError> {
    let mut failures: Vec<String> = Vec::new();

    match try_direct(path) {
        OpenAttempt::Opened(input) => {
            log::debug!("Opened {} with the default demuxer probe", path.display());
            return Ok(input);
        }
        OpenAttempt::TryNext(reason) => {
            log::debug!("Direct open of {} failed: {reason}", path.display());
            failures.push(format!("direct: {reason}"));
        }
    }

    match try_with_demuxer_options(path) {
        OpenAttempt::Opened(input) => {
            log::debug!("Opened {} with explicit demuxer options", path.display());
            return Ok(input);
        }
        OpenAttempt::TryNext(reason) => {
            log::debug!(
                "Open of {} with explicit demuxer options failed: {reason}",
                path.display()
            );
            failures.push(format!("explicit demuxer options: {reason}"));
        }
    }

    match try_short_alias(path, alias_provider) {
        OpenAttempt::Opened(input) => {
            log::debug!(
                "Opened {} via its {} alias",
                path.display(),
                alias_provider.name()
            );
            return Ok(input);
        }
        OpenAttempt::TryNext(reason) => {
            failures.push(format!("short alias ({}): {reason}", alias_provider.name()));
        }
    }

    Err(LastFrameError::FileOpen {
        path: path.to_path_buf(),
        reason: failures.join("; "),
    })
}

fn try_direct(path: &Path) -> OpenAttempt {
    match ffmpeg_next::format::input(path) {
        Ok(input) => OpenAttempt::Opened(input),
        Err(error) => OpenAttempt::TryNext(error.to_string()),
    }
}

/// Reopen with the demuxer pinned down explicitly rather than left to the
/// automatic probe. Containers with broken or missing timestamps sometimes
/// fail the default open but succeed once `genpts` is forced and the probe
/// window is widened.
fn try_with_demuxer_options(path: &Path) -> OpenAttempt {
    let mut options = Dictionary::new();
    options.set("fflags", "+genpts");
    options.set("analyzeduration", "10000000");
    options.set("probesize", "10000000");

    match ffmpeg_next::format::input_with_dictionary(path, options) {
        Ok(input) => OpenAttempt::Opened(input),
        Err(error) => OpenAttempt::TryNext(error.to_string()),
    }
}

fn try_short_alias(path: &Path, provider: &dyn PathAliasProvider) -> OpenAttempt {
    let Some(alias) = provider.short_alias(path) else {
        return OpenAttempt::TryNext("no platform alias available".to_string());
    };

    log::debug!(
        "Retrying open with {} alias: {}",
        provider.name(),
        alias.display()
    );

    match ffmpeg_next::format::input(&alias) {
        Ok(input) => OpenAttempt::Opened(input),
        Err(error) => OpenAttempt::TryNext(error.to_string()),
    }
}
