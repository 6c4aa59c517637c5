// THEORY:
// The `Session` is the interactive controller. It is a flat poll loop: pull a
// frame, read the sliders, render, show, wait for one key, react. It is the only
// place `PlotParams` change, and it changes them strictly between renders.
//
// The loop is written against two seams. `FrameSource` decides where frames come
// from and when they run out; `Surface` is the window the canvas is shown in and
// the keyboard and sliders read from. Keeping both behind traits lets the same
// loop drive a still image or a video, and lets the tests drive it with a
// scripted surface instead of a real window.

use crate::core_modules::utils::image_helper::image_helper;
use crate::error::Result;
use crate::frame_source::FrameSource;
use crate::pipeline::{Channel, PipelineConfig, PlotParams, ProfilePipeline, SliderPositions};
use image::RgbImage;
use std::path::PathBuf;

pub const KEY_ESC: i32 = 27;

/// Key help printed when a session starts.
pub const KEY_HELP: &str = "Press:\n\
s            : to save image\n\
r, g, b, or k: to show colors\n\
q or ESC     : to quit";

/// A single key press, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    Toggle(Channel),
    Quit,
}

impl Command {
    pub fn from_key(key: i32) -> Option<Self> {
        if key == KEY_ESC {
            return Some(Command::Quit);
        }
        let key = u8::try_from(key).ok()? as char;
        match key {
            's' => Some(Command::Save),
            'r' => Some(Command::Toggle(Channel::Red)),
            'g' => Some(Command::Toggle(Channel::Green)),
            'b' => Some(Command::Toggle(Channel::Blue)),
            'k' => Some(Command::Toggle(Channel::Luminance)),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// A display with sliders and a keyboard.
pub trait Surface {
    /// Current positions of the row, scale and resize sliders.
    fn sliders(&mut self) -> Result<SliderPositions>;

    fn show(&mut self, canvas: &RgbImage) -> Result<()>;

    /// Waits up to `delay_ms` for a key press. `None` when no key was pressed.
    fn wait_key(&mut self, delay_ms: i32) -> Result<Option<i32>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    EndOfStream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of canvases shown.
    pub frames: u64,
    /// Snapshot files written, in order.
    pub snapshots: Vec<PathBuf>,
    pub stop: StopReason,
}

pub struct Session {
    config: PipelineConfig,
    params: PlotParams,
}

impl Session {
    pub fn new(config: PipelineConfig, params: PlotParams) -> Self {
        Self { config, params }
    }

    pub fn params(&self) -> &PlotParams {
        &self.params
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs until the user quits or the source is exhausted.
    pub fn run<F, S>(&mut self, source: &mut F, surface: &mut S) -> Result<SessionSummary>
    where
        F: FrameSource + ?Sized,
        S: Surface + ?Sized,
    {
        let backdrop = self.config.backdrop.unwrap_or_else(|| source.default_backdrop());
        let pipeline = ProfilePipeline::new(backdrop);
        log::debug!("session started with {backdrop:?} backdrop");

        let mut frames = 0u64;
        let mut snapshots = Vec::new();

        while let Some(frame) = source.next_frame()? {
            self.params.set_sliders(surface.sliders()?);
            let rendering = pipeline.render(&frame, &self.params)?;
            drop(frame);
            surface.show(&rendering.canvas)?;
            frames += 1;

            let command = surface.wait_key(source.poll_delay_ms())?.and_then(Command::from_key);
            match command {
                Some(Command::Save) => {
                    let path = self.config.output_dir.join(source.snapshot_name());
                    match image_helper::save(&path, &rendering.canvas) {
                        Ok(()) => {
                            log::info!("Saved plot to {}", path.display());
                            snapshots.push(path);
                        }
                        Err(err) => log::warn!("Could not save plot to {}: {err}", path.display()),
                    }
                }
                Some(Command::Toggle(channel)) => {
                    self.params.toggle(channel);
                    log::debug!("{channel:?} visible: {}", self.params.is_visible(channel));
                }
                Some(Command::Quit) => {
                    return Ok(SessionSummary { frames, snapshots, stop: StopReason::Quit });
                }
                None => {}
            }
        }

        Ok(SessionSummary { frames, snapshots, stop: StopReason::EndOfStream })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_menu_keys() {
        assert_eq!(Command::from_key('s' as i32), Some(Command::Save));
        assert_eq!(Command::from_key('r' as i32), Some(Command::Toggle(Channel::Red)));
        assert_eq!(Command::from_key('g' as i32), Some(Command::Toggle(Channel::Green)));
        assert_eq!(Command::from_key('b' as i32), Some(Command::Toggle(Channel::Blue)));
        assert_eq!(Command::from_key('k' as i32), Some(Command::Toggle(Channel::Luminance)));
        assert_eq!(Command::from_key('q' as i32), Some(Command::Quit));
        assert_eq!(Command::from_key(KEY_ESC), Some(Command::Quit));
    }

    #[test]
    fn ignores_other_keys() {
        assert_eq!(Command::from_key('x' as i32), None);
        assert_eq!(Command::from_key('R' as i32), None);
        assert_eq!(Command::from_key(-1), None);
        assert_eq!(Command::from_key(0x10_0073), None);
    }
}
