use image::RgbImage;
use line_profiler::pipeline::SliderPositions;
use line_profiler::session::Surface;
use line_profiler::{ProfileError, Result};
use opencv::{
    core::{self, Mat, Scalar},
    highgui,
    prelude::*,
};

const TRACKBAR_ROW: &str = "Row";
const TRACKBAR_SCALE: &str = "Scale";
const TRACKBAR_RESIZE: &str = "Resize";
const TRACKBAR_MAX: i32 = 100;

fn backend(err: opencv::Error) -> ProfileError {
    ProfileError::Backend(err.to_string())
}

/// An OpenCV highgui window with the three profile trackbars.
pub struct HighGuiSurface {
    window: String,
}

impl HighGuiSurface {
    pub fn open(window: &str, initial: SliderPositions) -> Result<Self> {
        highgui::named_window(window, highgui::WINDOW_AUTOSIZE).map_err(backend)?;

        for (name, position) in [
            (TRACKBAR_ROW, initial.row),
            (TRACKBAR_SCALE, initial.scale),
            (TRACKBAR_RESIZE, initial.resize),
        ] {
            highgui::create_trackbar(name, window, None, TRACKBAR_MAX, None).map_err(backend)?;
            highgui::set_trackbar_pos(name, window, position as i32).map_err(backend)?;
        }

        Ok(Self {
            window: window.to_string(),
        })
    }

    fn trackbar(&self, name: &str) -> Result<u32> {
        let position = highgui::get_trackbar_pos(name, &self.window).map_err(backend)?;
        Ok(position.max(0) as u32)
    }

    /// Copies an RGB canvas into a BGR `Mat` for display.
    fn to_bgr(canvas: &RgbImage) -> opencv::Result<Mat> {
        let mut mat = Mat::new_rows_cols_with_default(
            canvas.height() as i32,
            canvas.width() as i32,
            core::CV_8UC3,
            Scalar::all(0.0),
        )?;
        let bytes = mat.data_bytes_mut()?;
        for (bgr, rgb) in bytes.chunks_exact_mut(3).zip(canvas.pixels()) {
            bgr[0] = rgb[2];
            bgr[1] = rgb[1];
            bgr[2] = rgb[0];
        }
        Ok(mat)
    }
}

impl Surface for HighGuiSurface {
    fn sliders(&mut self) -> Result<SliderPositions> {
        Ok(SliderPositions {
            row: self.trackbar(TRACKBAR_ROW)?,
            scale: self.trackbar(TRACKBAR_SCALE)?,
            resize: self.trackbar(TRACKBAR_RESIZE)?,
        })
    }

    fn show(&mut self, canvas: &RgbImage) -> Result<()> {
        let mat = Self::to_bgr(canvas).map_err(backend)?;
        highgui::imshow(&self.window, &mat).map_err(backend)
    }

    fn wait_key(&mut self, delay_ms: i32) -> Result<Option<i32>> {
        let key = highgui::wait_key(delay_ms).map_err(backend)?;
        Ok((key >= 0).then_some(key & 0xFF))
    }
}

impl Drop for HighGuiSurface {
    fn drop(&mut self) {
        let _ = highgui::destroy_all_windows();
    }
}
