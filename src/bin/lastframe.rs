use std::{path::PathBuf, time::Duration};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lastframe::{FfmpegLogLevel, LastFrameError, VideoSource, resolve_output_path, write_image};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  lastframe video.mp4\n  lastframe video.mp4 poster.jpg\n  lastframe 测试视频.mp4 --json\n  lastframe video.mp4 --progress --verbose";

#[derive(Debug, Parser)]
#[command(
    name = "lastframe",
    version,
    about = "Extract the last decodable frame of a video file",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    #[arg(required_unless_present = "completions")]
    video: Option<PathBuf>,

    /// Output image path (defaults to {stem}_last_frame.png next to the video).
    output: Option<PathBuf>,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a spinner while decoding.
    #[arg(long)]
    progress: bool,

    /// Print the result as machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate shell completion scripts and exit.
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

fn run(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let video = cli.video.as_deref().ok_or("missing video path")?;

    if let Some(level) = &cli.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        lastframe::set_ffmpeg_log_level(parsed);
    }

    let mut source = VideoSource::open(video)?;
    let metadata = source.metadata().clone();

    if cli.verbose {
        eprintln!(
            "video: {}x{} @ {:.2} fps, ~{} frames [{}]",
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );
    }

    let spinner = if cli.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        pb.set_message(format!("decoding {}", video.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let frame = source.last_frame();

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let frame = frame?;
    drop(source);

    let output = resolve_output_path(video, cli.output.as_deref());
    write_image(&frame, &output)?;

    if cli.json {
        let payload = json!({
            "output": output.display().to_string(),
            "width": metadata.width,
            "height": metadata.height,
            "fps": metadata.frames_per_second,
            "frame_count": metadata.frame_count,
            "codec": metadata.codec,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "lastframe", &mut std::io::stdout());
        return;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    match run(&cli) {
        Ok(output) => {
            if !cli.json {
                println!("{} {}", "saved".green().bold(), output.display());
            }
        }
        Err(error) => {
            let label = match error.downcast_ref::<LastFrameError>() {
                Some(LastFrameError::NotFound { .. }) => "file not found",
                Some(_) => "error",
                None => "unknown error",
            };
            eprintln!("{} {error}", format!("{label}:").red().bold());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_log_level;

    #[test]
    fn parse_log_level_aliases() {
        assert!(parse_log_level("quiet").is_some());
        assert!(parse_log_level("WARN").is_some());
        assert!(parse_log_level("warning").is_some());
        assert!(parse_log_level("trace").is_some());
        assert!(parse_log_level("nope").is_none());
    }
}
