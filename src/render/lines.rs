use image::{Rgba, RgbaImage};
use kurbo::Point;

use crate::foundation::math::lerp;

/// Number of parameter samples used to trace a curve artifact.
const CURVE_STEPS: u32 = 120;

/// Stamp `color` if `(x, y)` lies within the canvas.
fn put_pixel_clipped(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, color);
}

/// Draw the discrete segment from `(x0, y0)` to `(x1, y1)`.
///
/// Bresenham error-accumulator walk: both endpoints are stamped and
/// consecutive pixels never differ by more than one unit per axis,
/// regardless of slope sign or steepness.
pub(crate) fn draw_segment(
    canvas: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put_pixel_clipped(canvas, i64::from(x), i64::from(y), color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Trace a curved stroke from `start` to `end`, bent towards `ctrl`.
///
/// Each of the 120 samples lerps start->end and start->ctrl, truncates both
/// intermediates to integer coordinates, then lerps between the truncated
/// points. Intentionally not a closed-form quadratic Bezier: the truncating
/// double-lerp gives the stroke its slightly ragged parameterization.
/// Samples falling outside the canvas are skipped.
pub(crate) fn draw_curve(
    canvas: &mut RgbaImage,
    start: Point,
    end: Point,
    ctrl: Point,
    color: Rgba<u8>,
) {
    for step in 0..CURVE_STEPS {
        let t = f64::from(step) / f64::from(CURVE_STEPS);
        let leg_x = lerp(start.x, end.x, t) as i64;
        let leg_y = lerp(start.y, end.y, t) as i64;
        let ctrl_x = lerp(start.x, ctrl.x, t) as i64;
        let ctrl_y = lerp(start.y, ctrl.y, t) as i64;
        let x = lerp(leg_x as f64, ctrl_x as f64, t) as i64;
        let y = lerp(leg_y as f64, ctrl_y as f64, t) as i64;
        put_pixel_clipped(canvas, x, y, color);
    }
}
