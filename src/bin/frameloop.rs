//! Frameloop entry point
//!
//! Renders the default scene fullscreen at a fixed rate until interrupted.
//! With the `videocore` feature it drives the Raspberry Pi display; otherwise
//! it runs against the headless backend.

use clap::Parser;
use frameloop::actor::os_interrupts;
use frameloop::{init_logging, ControllerConfig, Error, LoggingConfig, RunSummary, SurfaceSize};
use std::process::ExitCode;

/// Fixed-rate fullscreen render loop.
#[derive(Parser, Debug)]
#[command(name = "frameloop", version, about)]
struct Args {
    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,

    /// Extension function that must resolve on the context (repeatable)
    #[arg(long = "require-extension", value_name = "NAME")]
    required_extensions: Vec<String>,

    /// Surface size of the headless backend
    #[arg(long, value_name = "WxH", default_value = "1920x1080", value_parser = parse_size)]
    headless_size: SurfaceSize,

    /// Stop after this many frames (headless backend only)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,
}

fn parse_size(s: &str) -> Result<SurfaceSize, String> {
    let (w, h) = s
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("bad height `{h}`: {e}"))?;
    Ok(SurfaceSize::new(width, height))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&LoggingConfig {
        filter: args.log.clone(),
    });

    log::info!("Hello, frameloop!!");

    let config = ControllerConfig {
        frame_rate: args.fps,
        required_extensions: args.required_extensions.clone(),
        ..ControllerConfig::default()
    };

    match launch(&args, config) {
        Ok(summary) => {
            log::info!(
                "{} frames in {:.2}s",
                summary.frames,
                summary.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "videocore")]
fn launch(args: &Args, config: ControllerConfig) -> Result<RunSummary, Error> {
    let (_requests, interrupts) = os_interrupts()?;
    if args.frames.is_some() {
        log::warn!("--frames is only honored by the headless backend");
    }
    frameloop::run(frameloop::platform::VideoCore::new(), config, interrupts)
}

#[cfg(not(feature = "videocore"))]
fn launch(args: &Args, config: ControllerConfig) -> Result<RunSummary, Error> {
    let (requests, interrupts) = os_interrupts()?;
    let mut platform = frameloop::HeadlessPlatform::new(args.headless_size);
    if let Some(frames) = args.frames {
        platform = platform.with_stop_after(frames, requests);
    }
    frameloop::run(platform, config, interrupts)
}
