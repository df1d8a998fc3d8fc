use std::path::Path;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::font::face::{FontFace, GlyphMetrics};
use crate::foundation::error::{WarbleError, WarbleResult};
use crate::foundation::raster;

/// Production [`FontFace`] backed by a parsed `fontdue` font.
///
/// The wrapped font is read-only after parsing, so a single face can be
/// shared across threads.
#[derive(Debug)]
pub struct FontdueFace {
    font: fontdue::Font,
    size: f32,
}

impl FontdueFace {
    /// Parse raw TTF/OTF bytes at the given pixel size.
    pub fn from_bytes(bytes: &[u8], size: f32) -> WarbleResult<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(WarbleError::font)?;
        Ok(Self { font, size })
    }

    /// Read and parse a TTF/OTF file at the given pixel size.
    pub fn from_path(path: impl AsRef<Path>, size: f32) -> WarbleResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading font file {}", path.display()))?;
        Self::from_bytes(&bytes, size)
    }
}

impl FontFace for FontdueFace {
    fn measure(&self, ch: char) -> GlyphMetrics {
        let metrics = self.font.metrics(ch, self.size);
        // fontdue reports descent as a negative offset below the baseline.
        let (ascent, descent) = match self.font.horizontal_line_metrics(self.size) {
            Some(line) => (line.ascent, -line.descent),
            None => (self.size, 0.0),
        };
        GlyphMetrics {
            advance: metrics.advance_width,
            ascent,
            descent,
        }
    }

    fn rasterize(
        &self,
        ch: char,
        canvas: &mut RgbaImage,
        pen_x: i32,
        baseline_y: i32,
        color: Rgba<u8>,
    ) {
        let (metrics, coverage) = self.font.rasterize(ch, self.size);
        let left = pen_x + metrics.xmin;
        let top = baseline_y - metrics.ymin - metrics.height as i32;
        let (canvas_w, canvas_h) = canvas.dimensions();

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let cov = coverage[row * metrics.width + col];
                if cov == 0 {
                    continue;
                }
                let x = left + col as i32;
                let y = top + row as i32;
                if x < 0 || y < 0 || x >= canvas_w as i32 || y >= canvas_h as i32 {
                    continue;
                }
                let mut px = color;
                px[3] = raster::mul_div255(u16::from(color[3]), u16::from(cov));
                raster::blend_over(canvas.get_pixel_mut(x as u32, y as u32), px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_bytes_surface_a_font_error() {
        let err = FontdueFace::from_bytes(&[0u8; 16], 24.0).unwrap_err();
        assert!(matches!(err, WarbleError::Font(_)));
    }

    #[test]
    fn missing_file_surfaces_the_path() {
        let err = FontdueFace::from_path("no/such/font.ttf", 24.0).unwrap_err();
        assert!(err.to_string().contains("no/such/font.ttf"));
    }
}
