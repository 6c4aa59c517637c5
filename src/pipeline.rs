// THEORY:
// The `pipeline` module is the top-level rendering API. Given one frame and the
// current `PlotParams` it resizes the frame, samples the selected scanline and
// plots every visible channel onto a fresh canvas. It holds no per-frame state,
// so rendering the same frame with the same parameters always produces the same
// pixels.
//
// Two backdrops are supported. `Overlay` draws the plots over a copy of the frame
// with the scanline itself as the baseline, which shows exactly which strip is
// being measured. `Blank` draws on black with the baseline at the bottom edge,
// which keeps the full 0..255 range readable on busy video.

use crate::core_modules::pixel::pixel::Byte;
use crate::core_modules::plotter::{draw_marker, plot_row};
use crate::core_modules::scanline::{sample, Scanline};
use crate::core_modules::utils::image_helper::image_helper::resize_by_percent;
use crate::error::Result;
use image::{Rgb, RgbImage};
use std::path::PathBuf;

const MARKER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const MAX_PERCENT: u32 = 100;

/// What the canvas starts as before plots are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// A copy of the frame, baseline on the sampled row.
    Overlay,
    /// Black, baseline on the bottom edge.
    Blank,
}

/// One of the four plotted intensity channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Luminance,
}

impl Channel {
    /// Plot order; later channels are drawn over earlier ones.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Luminance];

    pub fn color(self, backdrop: Backdrop) -> Rgb<u8> {
        match (self, backdrop) {
            (Channel::Red, _) => Rgb([255, 0, 0]),
            (Channel::Green, _) => Rgb([0, 255, 0]),
            (Channel::Blue, _) => Rgb([0, 0, 255]),
            (Channel::Luminance, Backdrop::Overlay) => Rgb([0, 0, 0]),
            (Channel::Luminance, Backdrop::Blank) => Rgb([255, 255, 255]),
        }
    }

    pub fn values(self, scanline: &Scanline) -> &[Byte] {
        match self {
            Channel::Red => &scanline.red,
            Channel::Green => &scanline.green,
            Channel::Blue => &scanline.blue,
            Channel::Luminance => &scanline.luminance,
        }
    }
}

/// Raw trackbar positions, each in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderPositions {
    pub row: u32,
    pub scale: u32,
    pub resize: u32,
}

/// The user-adjustable state of a profiling session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotParams {
    /// Scanline position, 0 = top row, 100 = bottom row.
    pub row_percent: u32,
    /// Vertical plot scale; 100 maps a byte value to the same number of pixels.
    pub scale_percent: u32,
    /// Frame size relative to the input.
    pub resize_percent: u32,
    pub show_red: bool,
    pub show_green: bool,
    pub show_blue: bool,
    pub show_luminance: bool,
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            row_percent: 70,
            scale_percent: 40,
            resize_percent: 100,
            show_red: true,
            show_green: true,
            show_blue: true,
            show_luminance: true,
        }
    }
}

impl PlotParams {
    pub fn row_fraction(&self) -> f64 {
        self.row_percent as f64 / MAX_PERCENT as f64
    }

    pub fn scale(&self) -> f64 {
        self.scale_percent as f64 / MAX_PERCENT as f64
    }

    pub fn sliders(&self) -> SliderPositions {
        SliderPositions {
            row: self.row_percent,
            scale: self.scale_percent,
            resize: self.resize_percent,
        }
    }

    /// Copies trackbar positions in, clamped to 0..=100.
    pub fn set_sliders(&mut self, sliders: SliderPositions) {
        self.row_percent = sliders.row.min(MAX_PERCENT);
        self.scale_percent = sliders.scale.min(MAX_PERCENT);
        self.resize_percent = sliders.resize.min(MAX_PERCENT);
    }

    pub fn is_visible(&self, channel: Channel) -> bool {
        match channel {
            Channel::Red => self.show_red,
            Channel::Green => self.show_green,
            Channel::Blue => self.show_blue,
            Channel::Luminance => self.show_luminance,
        }
    }

    pub fn toggle(&mut self, channel: Channel) {
        let flag = match channel {
            Channel::Red => &mut self.show_red,
            Channel::Green => &mut self.show_green,
            Channel::Blue => &mut self.show_blue,
            Channel::Luminance => &mut self.show_luminance,
        };
        *flag = !*flag;
    }
}

/// Configuration for a profiling session.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Forces a backdrop; `None` lets the frame source choose.
    pub backdrop: Option<Backdrop>,
    /// Directory snapshots are written to.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backdrop: None,
            output_dir: PathBuf::from("."),
        }
    }
}

/// The output of the pipeline for a single frame.
#[derive(Debug, Clone)]
pub struct Rendering {
    pub canvas: RgbImage,
    pub scanline: Scanline,
}

/// Renders scanline profiles for individual frames.
#[derive(Debug, Clone)]
pub struct ProfilePipeline {
    backdrop: Backdrop,
}

impl ProfilePipeline {
    pub fn new(backdrop: Backdrop) -> Self {
        Self { backdrop }
    }

    pub fn backdrop(&self) -> Backdrop {
        self.backdrop
    }

    pub fn render(&self, frame: &RgbImage, params: &PlotParams) -> Result<Rendering> {
        // Stage 1: Resize
        let view = resize_by_percent(frame, params.resize_percent);

        // Stage 2: Sample
        let scanline = sample(&view, params.row_fraction())?;

        // Stage 3: Backdrop
        let (mut canvas, baseline) = match self.backdrop {
            Backdrop::Overlay => (view.into_owned(), scanline.row as i32),
            Backdrop::Blank => {
                let (width, height) = view.dimensions();
                (RgbImage::new(width, height), height as i32)
            }
        };

        // Stage 4: Plot
        for channel in Channel::ALL {
            if params.is_visible(channel) {
                plot_row(
                    &mut canvas,
                    channel.values(&scanline),
                    baseline,
                    params.scale(),
                    channel.color(self.backdrop),
                );
            }
        }
        if self.backdrop == Backdrop::Overlay {
            draw_marker(&mut canvas, baseline, MARKER_COLOR);
        }

        log::debug!(
            "rendered row {} of {}x{} frame",
            scanline.row,
            canvas.width(),
            canvas.height()
        );
        Ok(Rendering { canvas, scanline })
    }
}
