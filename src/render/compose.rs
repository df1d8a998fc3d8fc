use image::{Rgba, RgbaImage, imageops};
use rand::Rng;

use crate::config::model::CaptchaConfig;
use crate::font::face::FontFace;
use crate::foundation::raster::{crop_to_bounds, tight_bounds};
use crate::render::warp;

/// Rasterize one character into its own square cell, run it through the
/// transform chain, and tighten it to its opaque bounds.
pub(crate) fn render_glyph<R: Rng + ?Sized>(
    face: &dyn FontFace,
    ch: char,
    config: &CaptchaConfig,
    rng: &mut R,
) -> RgbaImage {
    let metrics = face.measure(ch);
    let advance = metrics.advance.ceil().max(1.0) as u32;
    let line_height = metrics.line_height().ceil().max(1.0) as u32;
    let cell = advance.max(line_height);

    // Center both the advance box and the ascent/descent span in the cell.
    let mut canvas = RgbaImage::new(cell, cell);
    let pen_x = ((cell as f32 - metrics.advance) / 2.0).round() as i32;
    let baseline_y =
        ((cell as f32 - metrics.line_height()) / 2.0 + metrics.ascent).round() as i32;
    face.rasterize(ch, &mut canvas, pen_x, baseline_y, Rgba(config.foreground));

    let canvas = warp::scale(canvas, config.scale, rng);
    let canvas = warp::distort(canvas, config.distortion, rng);
    let canvas = warp::rotate(canvas, config.rotation, rng);
    crop_to_bounds(&canvas, tight_bounds(&canvas))
}

/// Lay the code's transformed glyphs onto one canvas with randomized
/// horizontal spacing and vertical jitter, then tighten to the opaque
/// bounds.
///
/// An empty code yields a 0x0 canvas.
pub(crate) fn compose_string<R: Rng + ?Sized>(
    face: &dyn FontFace,
    code: &str,
    config: &CaptchaConfig,
    rng: &mut R,
) -> RgbaImage {
    if code.is_empty() {
        return RgbaImage::new(0, 0);
    }

    // Size the working canvas generously so spacing, scale, and rotation
    // never push a glyph off the edge before tightening.
    let total_advance: f64 = code
        .chars()
        .map(|ch| f64::from(face.measure(ch).advance))
        .sum();
    let line_height = code
        .chars()
        .map(|ch| f64::from(face.measure(ch).line_height()))
        .fold(0.0, f64::max);
    let headroom = config.scale.max.max(1.0);
    let width = (total_advance * config.spacing.max.max(1.0) * headroom * 2.0)
        .ceil()
        .max(1.0) as u32;
    let height = (line_height * headroom * 2.0).ceil().max(1.0) as u32;

    let mut canvas = RgbaImage::new(width, height);
    let base_y = i64::from(height) / 3;
    let mut pen_x: i64 = 0;

    for ch in code.chars() {
        let glyph = render_glyph(face, ch, config, rng);
        if glyph.width() > 0 && glyph.height() > 0 {
            let jitter_span = i64::from(glyph.height()) / 8;
            let jitter = if jitter_span > 0 {
                rng.gen_range(-jitter_span..=jitter_span)
            } else {
                0
            };
            imageops::overlay(&mut canvas, &glyph, pen_x, base_y + jitter);
        }
        let spacing = config.spacing.sample(rng);
        pen_x += (f64::from(glyph.width()) * spacing) as i64;
    }

    crop_to_bounds(&canvas, tight_bounds(&canvas))
}
