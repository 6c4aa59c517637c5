use image::RgbImage;
use line_profiler::frame_source::FrameSource;
use line_profiler::pipeline::Backdrop;
use line_profiler::{ProfileError, Result};
use opencv::{
    core::Mat,
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use std::borrow::Cow;
use std::path::Path;

pub const POLL_DELAY_MS: i32 = 1;

/// Decodes a video file one frame per session iteration.
pub struct VideoSource {
    cap: VideoCapture,
    frame: Mat,
    position: u64,
}

impl VideoSource {
    /// Opens `path`; a video that cannot be opened or reports no frames is rejected.
    pub fn open(path: &Path) -> Result<Self> {
        let empty = || ProfileError::EmptyVideo { path: path.to_path_buf() };

        let cap = VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY).map_err(|_| empty())?;
        let opened = cap.is_opened().unwrap_or(false);
        let frame_count = cap.get(videoio::CAP_PROP_FRAME_COUNT).unwrap_or(0.0);
        if !opened || frame_count <= 0.0 {
            return Err(empty());
        }
        log::info!("opened {} ({frame_count} frames)", path.display());

        Ok(Self {
            cap,
            frame: Mat::default(),
            position: 0,
        })
    }

    /// Converts the last decoded BGR frame into an RGB image.
    fn current_rgb(&self) -> opencv::Result<Option<RgbImage>> {
        let mut rgb = Mat::default();
        imgproc::cvt_color(&self.frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
        let bytes = rgb.data_bytes()?.to_vec();
        Ok(RgbImage::from_raw(rgb.cols() as u32, rgb.rows() as u32, bytes))
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<Cow<'_, RgbImage>>> {
        match self.cap.read(&mut self.frame) {
            Ok(true) if !self.frame.empty() => {}
            Ok(_) => return Ok(None),
            Err(e) => {
                log::warn!("Error reading frame: {e}");
                return Ok(None);
            }
        }

        self.position = self
            .cap
            .get(videoio::CAP_PROP_POS_FRAMES)
            .map(|pos| pos as u64)
            .unwrap_or(self.position + 1);

        match self.current_rgb() {
            Ok(Some(frame)) => Ok(Some(Cow::Owned(frame))),
            Ok(None) => {
                log::warn!("frame {} has an unexpected layout", self.position);
                Ok(None)
            }
            Err(e) => {
                log::warn!("Error converting frame {}: {e}", self.position);
                Ok(None)
            }
        }
    }

    fn snapshot_name(&self) -> String {
        format!("plot_{}.jpg", self.position)
    }

    fn poll_delay_ms(&self) -> i32 {
        POLL_DELAY_MS
    }

    fn default_backdrop(&self) -> Backdrop {
        Backdrop::Blank
    }
}
