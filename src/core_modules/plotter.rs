// THEORY:
// The row plotter draws one channel sequence as an open polyline. Column `i`
// becomes the point `(i, baseline - scale * value[i])`, so brighter samples sit
// higher on the canvas and a scale of zero collapses the whole plot onto the
// baseline.
//
// Strokes are two canvas units wide. Each segment is rasterized with
// `imageproc`'s Bresenham line and then once more shifted by a pixel across its
// dominant direction. Pixels that fall outside the canvas are dropped by the
// line primitive, so plots can run off the top or bottom freely.

use crate::core_modules::pixel::pixel::Byte;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

/// Stroke width of every plotted line, in canvas pixels.
pub const LINE_WIDTH: i32 = 2;

type Point = (i32, i32);

/// Vertical distance in pixels a sample is drawn above the baseline.
pub fn scaled_offset(value: Byte, scale: f64) -> i32 {
    (scale * value as f64) as i32
}

/// Draws `values` as a polyline onto `canvas`, one point per column.
pub fn plot_row(canvas: &mut RgbImage, values: &[Byte], baseline: i32, scale: f64, color: Rgb<u8>) {
    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(x, &value)| (x as i32, baseline - scaled_offset(value, scale)))
        .collect();

    match points.as_slice() {
        [] => {}
        [only] => draw_stroke(canvas, *only, *only, color),
        _ => {
            for segment in points.windows(2) {
                draw_stroke(canvas, segment[0], segment[1], color);
            }
        }
    }
}

/// Draws a full-width horizontal marker line at `row`.
pub fn draw_marker(canvas: &mut RgbImage, row: i32, color: Rgb<u8>) {
    let right = canvas.width() as i32;
    draw_stroke(canvas, (0, row), (right, row), color);
}

fn draw_stroke(canvas: &mut RgbImage, start: Point, end: Point, color: Rgb<u8>) {
    let steep = (end.1 - start.1).abs() > (end.0 - start.0).abs();
    let (dx, dy) = if steep { (-1, 0) } else { (0, -1) };

    for step in 0..LINE_WIDTH {
        let from = (start.0 + dx * step, start.1 + dy * step);
        let to = (end.0 + dx * step, end.1 + dy * step);
        draw_line_segment_mut(
            canvas,
            (from.0 as f32, from.1 as f32),
            (to.0 as f32, to.1 as f32),
            color,
        );
    }
}
