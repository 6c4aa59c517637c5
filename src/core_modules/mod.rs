pub mod pixel;
pub mod plotter;
pub mod scanline;
pub mod utils;
