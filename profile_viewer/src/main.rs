use anyhow::Context;
use clap::{Parser, ValueEnum};
use line_profiler::error::EXIT_RUNTIME;
use line_profiler::frame_source::{FrameSource, InputKind, StillImage};
use line_profiler::pipeline::{Backdrop, PipelineConfig, PlotParams};
use line_profiler::session::{Session, KEY_HELP};
use line_profiler::ProfileError;
use std::path::PathBuf;

mod highgui_surface;
mod video_source;

use highgui_surface::HighGuiSurface;
use video_source::VideoSource;

const WINDOW_NAME: &str = "line_profiler";
const DEFAULT_INPUT: &str = "../Images/line.mp4";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackdropArg {
    /// Plot over the frame, baseline on the scanline
    Overlay,
    /// Plot on black, baseline at the bottom edge
    Blank,
}

impl From<BackdropArg> for Backdrop {
    fn from(arg: BackdropArg) -> Self {
        match arg {
            BackdropArg::Overlay => Backdrop::Overlay,
            BackdropArg::Blank => Backdrop::Blank,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot R, G, B and luminance along a scanline of an image or video")]
struct Args {
    /// Image or video to profile (.mp4 and .avi are read as video)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Initial scanline position, percent of the frame height
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u32).range(0..=100))]
    row: u32,

    /// Initial vertical plot scale, percent
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(0..=100))]
    scale: u32,

    /// Initial frame size, percent of the input
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(0..=100))]
    resize: u32,

    /// Canvas style; defaults to overlay for images and blank for video
    #[arg(long, value_enum)]
    backdrop: Option<BackdropArg>,

    /// Directory snapshots are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        println!("{err:#}");
        let code = err
            .downcast_ref::<ProfileError>()
            .map_or(EXIT_RUNTIME, ProfileError::exit_code);
        std::process::exit(code);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // --- 1. Frame Source ---
    // Inputs are validated before any window exists.
    let mut source: Box<dyn FrameSource> = match InputKind::from_path(&args.input) {
        InputKind::Video => Box::new(VideoSource::open(&args.input)?),
        InputKind::Image => {
            let decoded = StillImage::decode(&args.input)?;
            println!("{}", StillImage::describe(&decoded));
            Box::new(StillImage::from_decoded(&args.input, decoded)?)
        }
    };

    // --- 2. Parameters & Window ---
    let params = PlotParams {
        row_percent: args.row,
        scale_percent: args.scale,
        resize_percent: args.resize,
        ..PlotParams::default()
    };
    let config = PipelineConfig {
        backdrop: args.backdrop.map(Backdrop::from),
        output_dir: args.output_dir,
    };
    let mut surface = HighGuiSurface::open(WINDOW_NAME, params.sliders())?;
    println!("{KEY_HELP}");

    // --- 3. Interactive Loop ---
    let mut session = Session::new(config, params);
    let summary = session
        .run(source.as_mut(), &mut surface)
        .context("profiling session failed")?;

    log::info!(
        "session ended ({:?}) after {} frames, {} snapshots",
        summary.stop,
        summary.frames,
        summary.snapshots.len()
    );
    Ok(())
}
