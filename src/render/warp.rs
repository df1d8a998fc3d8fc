use image::{Rgba, RgbaImage, imageops};
use kurbo::{Affine, Point};
use rand::Rng;

use crate::foundation::math::Interval;

/// Resample `glyph` by independent X/Y factors drawn from `factors`.
///
/// A range fixed at 1 is the identity and returns the input untouched;
/// a fixed range elsewhere applies the single factor to both axes.
pub(crate) fn scale<R: Rng + ?Sized>(
    glyph: RgbaImage,
    factors: Interval<f64>,
    rng: &mut R,
) -> RgbaImage {
    if factors.is_fixed() && factors.min == 1.0 {
        return glyph;
    }
    let sx = factors.sample(rng);
    let sy = factors.sample(rng);
    let width = (f64::from(glyph.width()) * sx).round() as u32;
    let height = (f64::from(glyph.height()) * sy).round() as u32;
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    imageops::resize(&glyph, width, height, imageops::FilterType::CatmullRom)
}

/// Warp `glyph` with a per-pixel sinusoidal offset of amplitude drawn from
/// `amplitude`.
///
/// For destination pixel `(x, y)` the source sample is offset by
/// `A*sin(2*pi*y/period)` horizontally and `A*cos(2*pi*x/period)` vertically,
/// with `period = height/2`. Out-of-bounds samples leave the destination
/// pixel transparent.
pub(crate) fn distort<R: Rng + ?Sized>(
    glyph: RgbaImage,
    amplitude: Interval<f64>,
    rng: &mut R,
) -> RgbaImage {
    if amplitude.is_fixed() && amplitude.min == 0.0 {
        return glyph;
    }
    let strength = amplitude.sample(rng);
    let (width, height) = glyph.dimensions();
    if width == 0 || height == 0 {
        return glyph;
    }

    let period = f64::from(height) / 2.0;
    let mut dst = RgbaImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let x_ofs = strength * (std::f64::consts::TAU * f64::from(y) / period).sin();
            let y_ofs = strength * (std::f64::consts::TAU * f64::from(x) / period).cos();
            let sx = i64::from(x) + x_ofs.round() as i64;
            let sy = i64::from(y) + y_ofs.round() as i64;
            if sx >= 0 && sx < i64::from(width) && sy >= 0 && sy < i64::from(height) {
                dst.put_pixel(x, y, *glyph.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    dst
}

/// Rotate `glyph` by an angle in degrees drawn from `degrees`.
///
/// The destination canvas is enlarged to bound the rotated source;
/// destination pixels with no source counterpart stay transparent.
pub(crate) fn rotate<R: Rng + ?Sized>(
    glyph: RgbaImage,
    degrees: Interval<f64>,
    rng: &mut R,
) -> RgbaImage {
    if degrees.is_fixed() && degrees.min == 0.0 {
        return glyph;
    }
    let angle = degrees.sample(rng).to_radians();
    let (src_w, src_h) = glyph.dimensions();
    if src_w == 0 || src_h == 0 {
        return glyph;
    }

    let (sin, cos) = angle.sin_cos();
    let w = f64::from(src_w);
    let h = f64::from(src_h);
    let dst_w = ((w * cos).abs() + (h * sin).abs()).ceil().max(1.0) as u32;
    let dst_h = ((w * sin).abs() + (h * cos).abs()).ceil().max(1.0) as u32;

    // Destination pixels map back into source space through the inverse of
    // "rotate about the source center, recenter in the destination".
    let forward = Affine::translate((f64::from(dst_w) / 2.0, f64::from(dst_h) / 2.0))
        * Affine::rotate(angle)
        * Affine::translate((-w / 2.0, -h / 2.0));
    let inverse = forward.inverse();

    let mut dst = RgbaImage::new(dst_w, dst_h);
    for y in 0..dst_h {
        for x in 0..dst_w {
            let src = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if let Some(px) = sample_catmull_rom(&glyph, src.x - 0.5, src.y - 0.5) {
                dst.put_pixel(x, y, px);
            }
        }
    }
    dst
}

/// Catmull-Rom interpolation kernel (cubic, a = -0.5).
fn catmull_rom_weight(t: f64) -> f64 {
    let t = t.abs();
    if t < 1.0 {
        1.5 * t.powi(3) - 2.5 * t.powi(2) + 1.0
    } else if t < 2.0 {
        -0.5 * t.powi(3) + 2.5 * t.powi(2) - 4.0 * t + 2.0
    } else {
        0.0
    }
}

/// Sample `src` at fractional `(x, y)` with a 4x4 Catmull-Rom kernel.
///
/// Returns `None` when the sample point lies outside the source grid; edge
/// taps are clamped to the border.
fn sample_catmull_rom(src: &RgbaImage, x: f64, y: f64) -> Option<Rgba<u8>> {
    let (w, h) = src.dimensions();
    if x < 0.0 || y < 0.0 || x > f64::from(w - 1) || y > f64::from(h - 1) {
        return None;
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let mut acc = [0.0f64; 4];
    let mut weight_sum = 0.0;
    for j in -1i64..=2 {
        let wy = catmull_rom_weight(j as f64 - fy);
        if wy == 0.0 {
            continue;
        }
        let sy = (y0 as i64 + j).clamp(0, i64::from(h) - 1) as u32;
        for i in -1i64..=2 {
            let wx = catmull_rom_weight(i as f64 - fx);
            if wx == 0.0 {
                continue;
            }
            let sx = (x0 as i64 + i).clamp(0, i64::from(w) - 1) as u32;
            let weight = wx * wy;
            let px = src.get_pixel(sx, sy);
            for ch in 0..4 {
                acc[ch] += weight * f64::from(px[ch]);
            }
            weight_sum += weight;
        }
    }
    if weight_sum <= 0.0 {
        return None;
    }

    let mut out = [0u8; 4];
    for ch in 0..4 {
        out[ch] = (acc[ch] / weight_sum).round().clamp(0.0, 255.0) as u8;
    }
    Some(Rgba(out))
}
