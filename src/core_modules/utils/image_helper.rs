pub mod image_helper {
    use image::imageops::{self, FilterType};
    use image::RgbImage;
    use std::borrow::Cow;
    use std::path::Path;

    /// Scales both dimensions by `percent / 100`, never below one pixel.
    /// At 100% the frame is borrowed, not copied.
    pub fn resize_by_percent(frame: &RgbImage, percent: u32) -> Cow<'_, RgbImage> {
        if percent == 100 {
            return Cow::Borrowed(frame);
        }
        let factor = percent as f64 / 100.0;
        let width = ((frame.width() as f64 * factor) as u32).max(1);
        let height = ((frame.height() as f64 * factor) as u32).max(1);
        Cow::Owned(imageops::resize(frame, width, height, FilterType::Triangle))
    }

    /// Writes `canvas` to `path`, replacing any existing file. The encoder is
    /// picked from the file extension.
    pub fn save(path: &Path, canvas: &RgbImage) -> Result<(), image::error::ImageError> {
        canvas.save(path)?;
        Ok(())
    }
}
