// THEORY:
// A `FrameSource` is anything that can hand the session a stream of RGB frames:
// a still image that is re-profiled every iteration, or a video that is decoded
// frame by frame until it runs out. The session loop only sees this trait, so
// both inputs share the same sampling, rendering, key handling and snapshot
// logic.
//
// Sources also carry the small pieces of behavior that genuinely differ between
// inputs: how a snapshot file is named, how long to wait for a key press between
// frames, and which backdrop suits the content.

use crate::error::{ProfileError, Result};
use crate::pipeline::Backdrop;
use image::{DynamicImage, RgbImage};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const VIDEO_EXTENSIONS: [&str; 2] = ["mp4", "avi"];

/// Supplies frames to an interactive session.
pub trait FrameSource {
    /// The next frame to profile, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Cow<'_, RgbImage>>>;

    /// File name a snapshot of the current frame is saved under.
    fn snapshot_name(&self) -> String;

    /// Milliseconds to wait for a key press after each frame.
    fn poll_delay_ms(&self) -> i32;

    fn default_backdrop(&self) -> Backdrop;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Image,
    Video,
}

impl InputKind {
    /// `.mp4` and `.avi` files (any case) are videos; everything else is an image.
    pub fn from_path(path: &Path) -> Self {
        let is_video = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)));
        if is_video { InputKind::Video } else { InputKind::Image }
    }
}

/// A single decoded image, yielded again on every iteration.
pub struct StillImage {
    path: PathBuf,
    frame: RgbImage,
}

impl StillImage {
    pub const SNAPSHOT_NAME: &'static str = "output.jpg";
    pub const POLL_DELAY_MS: i32 = 10;

    /// Loads `path`, accepting only 8-bit three-channel images.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_decoded(path, Self::decode(path)?)
    }

    /// Decodes `path` in whatever pixel format it is stored in.
    pub fn decode(path: &Path) -> Result<DynamicImage> {
        image::open(path).map_err(|err| {
            log::debug!("failed to decode {}: {err}", path.display());
            ProfileError::InputNotFound { path: path.to_path_buf() }
        })
    }

    /// Pixel format and `rows x cols` of a decoded image, one per line.
    pub fn describe(decoded: &DynamicImage) -> String {
        format!("{:?}\n{}x{}", decoded.color(), decoded.height(), decoded.width())
    }

    /// Wraps an already decoded image, accepting only 8-bit three-channel images.
    pub fn from_decoded(path: &Path, decoded: DynamicImage) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            frame: Self::require_rgb8(decoded)?,
        })
    }

    pub fn from_frame(path: impl Into<PathBuf>, frame: RgbImage) -> Self {
        Self { path: path.into(), frame }
    }

    fn require_rgb8(decoded: DynamicImage) -> Result<RgbImage> {
        match decoded {
            DynamicImage::ImageRgb8(frame) => Ok(frame),
            other => Err(ProfileError::UnsupportedFormat {
                format: format!("{:?}", other.color()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame(&self) -> &RgbImage {
        &self.frame
    }
}

impl FrameSource for StillImage {
    fn next_frame(&mut self) -> Result<Option<Cow<'_, RgbImage>>> {
        Ok(Some(Cow::Borrowed(&self.frame)))
    }

    fn snapshot_name(&self) -> String {
        Self::SNAPSHOT_NAME.to_string()
    }

    fn poll_delay_ms(&self) -> i32 {
        Self::POLL_DELAY_MS
    }

    fn default_backdrop(&self) -> Backdrop {
        Backdrop::Overlay
    }
}
