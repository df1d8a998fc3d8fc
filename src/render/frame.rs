use image::{Rgba, RgbaImage, imageops};
use kurbo::Point;
use rand::Rng;

use crate::config::model::CaptchaConfig;
use crate::foundation::raster::near_color;
use crate::render::lines;

/// Composite the string canvas onto a background-filled frame, then apply
/// noise speckling and line artifacts.
pub(crate) fn assemble<R: Rng + ?Sized>(
    config: &CaptchaConfig,
    string_canvas: &RgbaImage,
    rng: &mut R,
) -> RgbaImage {
    let mut frame = RgbaImage::from_pixel(config.width, config.height, Rgba(config.background));

    let offset_x = (i64::from(config.width) - i64::from(string_canvas.width())) / 2;
    let offset_y = (i64::from(config.height) - i64::from(string_canvas.height())) / 2;
    imageops::overlay(&mut frame, string_canvas, offset_x, offset_y);

    speckle(config, &mut frame, rng);
    draw_artifacts(config, &mut frame, rng);
    frame
}

/// Stamp `width * height * noise_level` randomly chosen positions
/// (duplicates allowed) with the foreground color.
fn speckle<R: Rng + ?Sized>(config: &CaptchaConfig, frame: &mut RgbaImage, rng: &mut R) {
    if config.noise_level <= 0.0 {
        return;
    }
    // A hand-built config may have skipped validation; clamp rather than
    // trust the level.
    let level = config.noise_level.min(1.0);
    let count = (f64::from(config.width) * f64::from(config.height) * level).round() as u64;
    for _ in 0..count {
        let x = rng.gen_range(0..config.width);
        let y = rng.gen_range(0..config.height);
        frame.put_pixel(x, y, Rgba(config.foreground));
    }
}

/// Draw a sampled number of strokes, each a fair-coin choice between a
/// straight segment and a curve, in colors near the foreground.
fn draw_artifacts<R: Rng + ?Sized>(config: &CaptchaConfig, frame: &mut RgbaImage, rng: &mut R) {
    if config.lines.is_fixed() && config.lines.min == 0 {
        return;
    }
    let count = config.lines.sample(rng);
    tracing::debug!(count, "drawing line artifacts");

    for _ in 0..count {
        if rng.gen_bool(0.5) {
            let (x0, y0) = random_point(config, rng);
            let (x1, y1) = random_point(config, rng);
            let color = near_color(Rgba(config.foreground), rng);
            lines::draw_segment(frame, x0, y0, x1, y1, color);
        } else {
            let start = random_fpoint(config, rng);
            let end = random_fpoint(config, rng);
            let ctrl = random_fpoint(config, rng);
            let color = near_color(Rgba(config.foreground), rng);
            lines::draw_curve(frame, start, end, ctrl, color);
        }
    }
}

fn random_point<R: Rng + ?Sized>(config: &CaptchaConfig, rng: &mut R) -> (i32, i32) {
    (
        rng.gen_range(0..config.width) as i32,
        rng.gen_range(0..config.height) as i32,
    )
}

fn random_fpoint<R: Rng + ?Sized>(config: &CaptchaConfig, rng: &mut R) -> Point {
    let (x, y) = random_point(config, rng);
    Point::new(f64::from(x), f64::from(y))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::foundation::math::Interval;

    fn quiet_config() -> CaptchaConfig {
        CaptchaConfig {
            noise_level: 0.0,
            lines: Interval::fixed(0),
            ..CaptchaConfig::default()
        }
    }

    fn background_count(frame: &RgbaImage, background: [u8; 4]) -> usize {
        frame.pixels().filter(|px| px.0 == background).count()
    }

    #[test]
    fn empty_string_canvas_assembles_to_pure_background() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(9);
        let frame = assemble(&config, &RgbaImage::new(0, 0), &mut rng);
        assert_eq!(frame.dimensions(), (config.width, config.height));
        assert_eq!(
            background_count(&frame, config.background),
            (config.width * config.height) as usize
        );
    }

    #[test]
    fn string_canvas_is_centered() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(10);
        let text = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
        let frame = assemble(&config, &text, &mut rng);

        for (x, y, px) in frame.enumerate_pixels() {
            let inside = (50..70).contains(&x) && (20..30).contains(&y);
            if inside {
                assert_eq!(px.0, [0, 0, 0, 255]);
            } else {
                assert_eq!(px.0, config.background);
            }
        }
    }

    #[test]
    fn oversized_string_canvas_clips_without_panicking() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(11);
        let text = RgbaImage::from_pixel(300, 90, Rgba([0, 0, 0, 255]));
        let frame = assemble(&config, &text, &mut rng);
        assert_eq!(frame.dimensions(), (config.width, config.height));
    }

    #[test]
    fn full_noise_speckles_most_of_the_frame() {
        let config = CaptchaConfig {
            noise_level: 1.0,
            ..quiet_config()
        };
        let mut rng = StdRng::seed_from_u64(12);
        let frame = assemble(&config, &RgbaImage::new(0, 0), &mut rng);
        let speckled = frame.pixels().filter(|px| px.0 == config.foreground).count();
        // width*height draws with replacement cover roughly 1 - 1/e of the
        // frame; a third is a safe floor.
        assert!(speckled > (config.width * config.height) as usize / 3);
    }

    #[test]
    fn fixed_line_count_marks_the_frame() {
        let config = CaptchaConfig {
            lines: Interval::fixed(5),
            ..quiet_config()
        };
        let mut rng = StdRng::seed_from_u64(13);
        let frame = assemble(&config, &RgbaImage::new(0, 0), &mut rng);
        let marked = (config.width * config.height) as usize
            - background_count(&frame, config.background);
        assert!(marked >= 5, "only {marked} artifact pixels");
    }
}
