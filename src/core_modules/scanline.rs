// THEORY:
// The scanline sampler turns one horizontal row of a frame into four parallel
// byte sequences: Red, Green, Blue and Luminance, one value per column. These
// sequences are the raw material for the row plotter.
//
// Row selection is expressed as a fraction of the frame height so the same
// slider position picks a comparable row after the frame is resized. The index
// is `round(fraction * (height - 1))`, which keeps 100% on the last row instead
// of one past it.

use crate::core_modules::pixel::pixel::{Byte, Pixel};
use crate::error::{ProfileError, Result};
use image::RgbImage;

/// One sampled row, split into per-channel sequences of equal length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scanline {
    /// The frame row the samples were read from.
    pub row: u32,
    pub red: Vec<Byte>,
    pub green: Vec<Byte>,
    pub blue: Vec<Byte>,
    pub luminance: Vec<Byte>,
}

impl Scanline {
    fn with_capacity(row: u32, width: usize) -> Self {
        Self {
            row,
            red: Vec::with_capacity(width),
            green: Vec::with_capacity(width),
            blue: Vec::with_capacity(width),
            luminance: Vec::with_capacity(width),
        }
    }

    fn push(&mut self, pixel: Pixel) {
        self.red.push(pixel.red);
        self.green.push(pixel.green);
        self.blue.push(pixel.blue);
        self.luminance.push(pixel.luminance());
    }

    /// Number of sampled columns.
    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// Maps a row fraction in `[0, 1]` onto a row of a frame `height` pixels tall.
/// Out-of-range and NaN fractions are clamped first.
pub fn row_index(fraction: f64, height: u32) -> u32 {
    if height == 0 {
        return 0;
    }
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let row = (fraction * (height - 1) as f64).round() as u32;
    row.min(height - 1)
}

/// Reads every column of `row`.
pub fn sample_row(frame: &RgbImage, row: u32) -> Result<Scanline> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(ProfileError::EmptyFrame { width, height });
    }
    if row >= height {
        return Err(ProfileError::RowOutOfBounds { row, height });
    }

    let mut scanline = Scanline::with_capacity(row, width as usize);
    for x in 0..width {
        scanline.push(Pixel::from(frame.get_pixel(x, row)));
    }
    Ok(scanline)
}

/// Samples the row selected by `fraction`.
pub fn sample(frame: &RgbImage, fraction: f64) -> Result<Scanline> {
    sample_row(frame, row_index(fraction, frame.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, (x + y) as u8]))
    }

    #[test]
    fn solid_red_row_splits_into_channels() {
        let frame = RgbImage::from_pixel(4, 1, Rgb([255, 0, 0]));
        let scanline = sample(&frame, 0.0).expect("sample");

        assert_eq!(scanline.row, 0);
        assert_eq!(scanline.red, vec![255; 4]);
        assert_eq!(scanline.green, vec![0; 4]);
        assert_eq!(scanline.blue, vec![0; 4]);
        assert_eq!(scanline.luminance, vec![76; 4]);
    }

    #[test]
    fn every_sequence_spans_the_frame_width() {
        for &(w, h) in &[(1u32, 1u32), (7, 3), (64, 48), (333, 2)] {
            let frame = gradient(w, h);
            for fraction in [0.0, 0.33, 0.7, 1.0] {
                let s = sample(&frame, fraction).expect("sample");
                assert_eq!(s.len(), w as usize);
                assert_eq!(s.green.len(), w as usize);
                assert_eq!(s.blue.len(), w as usize);
                assert_eq!(s.luminance.len(), w as usize);
            }
        }
    }

    #[test]
    fn samples_the_requested_row() {
        let frame = gradient(5, 10);
        let s = sample_row(&frame, 6).expect("sample");
        assert_eq!(s.red, vec![0, 1, 2, 3, 4]);
        assert_eq!(s.green, vec![6; 5]);
        assert_eq!(s.blue, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn row_index_rounds_over_last_row() {
        assert_eq!(row_index(0.0, 100), 0);
        assert_eq!(row_index(0.7, 100), 69); // 69.3
        assert_eq!(row_index(0.5, 4), 2); // 1.5 rounds away from zero
        assert_eq!(row_index(1.0, 100), 99);
        assert_eq!(row_index(1.0, 1), 0);
    }

    #[test]
    fn row_index_clamps_fraction() {
        assert_eq!(row_index(-0.5, 10), 0);
        assert_eq!(row_index(3.0, 10), 9);
        assert_eq!(row_index(f64::NAN, 10), 0);
        assert_eq!(row_index(0.5, 0), 0);
    }

    #[test]
    fn row_index_is_monotonic_in_fraction() {
        for height in [1u32, 2, 3, 17, 480, 1081] {
            let mut previous = 0;
            for step in 0..=1000 {
                let row = row_index(step as f64 / 1000.0, height);
                assert!(row >= previous, "height {height} step {step}");
                assert!(row < height);
                previous = row;
            }
        }
    }

    #[test]
    fn rejects_rows_past_the_frame() {
        let frame = gradient(3, 3);
        assert!(matches!(
            sample_row(&frame, 3),
            Err(ProfileError::RowOutOfBounds { row: 3, height: 3 })
        ));
    }

    #[test]
    fn rejects_empty_frames() {
        let frame = RgbImage::new(0, 0);
        assert!(matches!(sample(&frame, 0.5), Err(ProfileError::EmptyFrame { .. })));
    }
}
