// THEORY:
// The `Pixel` module is the most fundamental unit of the profiler. It is a
// "dumb" data container for one sample of a scanline, stored in Blue, Green, Red
// order the way camera frames arrive, plus the single derived metric the plots
// need: luminance.
//
// Luminance uses the 0.30 / 0.59 / 0.11 weighting and truncates to a byte. The
// weighted sum is done in integer hundredths so the truncation is exact; a white
// pixel is 255, not 254.

pub mod pixel {
    use image::Rgb;

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Luminance = Byte;

    const RED_WEIGHT: u32 = 30;
    const GREEN_WEIGHT: u32 = 59;
    const BLUE_WEIGHT: u32 = 11;
    const WEIGHT_TOTAL: u32 = 100;

    /// A "dumb" data container representing a single BGR pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The red channel value (0-255).
        pub red: Channel,
    }

    impl Pixel {
        pub fn new(blue: Channel, green: Channel, red: Channel) -> Self {
            Pixel { blue, green, red }
        }

        /// Perceived brightness, `floor(0.30 R + 0.59 G + 0.11 B)`.
        pub fn luminance(&self) -> Luminance {
            let weighted = RED_WEIGHT * self.red as u32
                + GREEN_WEIGHT * self.green as u32
                + BLUE_WEIGHT * self.blue as u32;
            (weighted / WEIGHT_TOTAL) as Luminance
        }
    }

    impl From<&Rgb<Byte>> for Pixel {
        fn from(rgb: &Rgb<Byte>) -> Self {
            let [red, green, blue] = rgb.0;
            Pixel::new(blue, green, red)
        }
    }

    impl From<Pixel> for Rgb<Byte> {
        fn from(pixel: Pixel) -> Self {
            Rgb([pixel.red, pixel.green, pixel.blue])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;
    use image::Rgb;

    #[test]
    fn luminance_truncates_weighted_sum() {
        // 0.30 * 255 = 76.5
        assert_eq!(Pixel::new(0, 0, 255).luminance(), 76);
        // 0.59 * 255 = 150.45
        assert_eq!(Pixel::new(0, 255, 0).luminance(), 150);
        // 0.11 * 255 = 28.05
        assert_eq!(Pixel::new(255, 0, 0).luminance(), 28);
        assert_eq!(Pixel::new(255, 255, 255).luminance(), 255);
        assert_eq!(Pixel::default().luminance(), 0);
    }

    #[test]
    fn luminance_matches_floor_of_float_formula() {
        for &(b, g, r) in &[(10u8, 20u8, 30u8), (7, 200, 13), (128, 64, 32), (1, 1, 1), (99, 0, 250)] {
            let expected = (0.30 * r as f64 + 0.59 * g as f64 + 0.11 * b as f64 + 1e-9).floor() as u8;
            assert_eq!(Pixel::new(b, g, r).luminance(), expected, "bgr=({b},{g},{r})");
        }
    }

    #[test]
    fn converts_from_rgb_order() {
        let pixel = Pixel::from(&Rgb([1u8, 2, 3]));
        assert_eq!(pixel, Pixel { red: 1, green: 2, blue: 3 });
        assert_eq!(Rgb::<u8>::from(pixel), Rgb([1, 2, 3]));
    }
}
