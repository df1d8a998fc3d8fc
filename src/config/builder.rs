use std::path::PathBuf;

use crate::config::model::CaptchaConfig;
use crate::font::face::FontFace;
use crate::font::fontdue_face::FontdueFace;
use crate::foundation::error::{WarbleError, WarbleResult};
use crate::foundation::math::Interval;
use crate::generator::Captcha;

enum FontSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Face(Box<dyn FontFace>),
}

/// Consuming builder for a configured [`Captcha`] generator.
///
/// Every setter overrides one configuration field; [`CaptchaBuilder::build`]
/// validates the assembled configuration, loads the font, and returns the
/// generator. A font source is the only required input.
pub struct CaptchaBuilder {
    config: CaptchaConfig,
    font: Option<FontSource>,
}

impl CaptchaBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: CaptchaConfig::default(),
            font: None,
        }
    }

    /// Start from an existing configuration (for example one deserialized
    /// from JSON).
    pub fn from_config(config: CaptchaConfig) -> Self {
        Self { config, font: None }
    }

    /// Set the output canvas dimensions in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Set the characters the code is drawn from.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.config.charset = charset.into();
        self
    }

    /// Set the inclusive bounds for the code length.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.config.length = Interval::new(min, max);
        self
    }

    /// Load the font from a TTF/OTF file at build time.
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font = Some(FontSource::Path(path.into()));
        self
    }

    /// Parse the font from raw TTF/OTF bytes at build time.
    pub fn font_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.font = Some(FontSource::Bytes(bytes.into()));
        self
    }

    /// Use a caller-supplied text-rendering backend.
    pub fn font_face(mut self, face: impl FontFace + 'static) -> Self {
        self.font = Some(FontSource::Face(Box::new(face)));
        self
    }

    /// Set the font size in pixels.
    pub fn font_size(mut self, size: f32) -> Self {
        self.config.font_size = size;
        self
    }

    /// Set the text color as straight-alpha RGBA8.
    pub fn foreground(mut self, color: [u8; 4]) -> Self {
        self.config.foreground = color;
        self
    }

    /// Set the background fill as straight-alpha RGBA8.
    pub fn background(mut self, color: [u8; 4]) -> Self {
        self.config.background = color;
        self
    }

    /// Set the per-character horizontal advance factor bounds.
    pub fn spacing(mut self, min: f64, max: f64) -> Self {
        self.config.spacing = Interval::new(min, max);
        self
    }

    /// Set the per-character rotation bounds in degrees, within `[-180, 180]`.
    pub fn rotation(mut self, min: f64, max: f64) -> Self {
        self.config.rotation = Interval::new(min, max);
        self
    }

    /// Set the per-character scale factor bounds.
    pub fn scale(mut self, min: f64, max: f64) -> Self {
        self.config.scale = Interval::new(min, max);
        self
    }

    /// Set the per-character sinusoidal warp amplitude bounds in pixels.
    pub fn distortion(mut self, min: f64, max: f64) -> Self {
        self.config.distortion = Interval::new(min, max);
        self
    }

    /// Set the inclusive bounds for the number of line artifacts.
    pub fn lines(mut self, min: u32, max: u32) -> Self {
        self.config.lines = Interval::new(min, max);
        self
    }

    /// Set the fraction of canvas pixels speckled with the foreground color.
    pub fn noise_level(mut self, level: f64) -> Self {
        self.config.noise_level = level;
        self
    }

    /// Validate the configuration, resolve the font source, and build the
    /// generator.
    pub fn build(self) -> WarbleResult<Captcha> {
        self.config.validate()?;
        let face: Box<dyn FontFace> = match self.font {
            None => return Err(WarbleError::validation("a font source is required")),
            Some(FontSource::Face(face)) => face,
            Some(FontSource::Bytes(bytes)) => {
                Box::new(FontdueFace::from_bytes(&bytes, self.config.font_size)?)
            }
            Some(FontSource::Path(path)) => {
                Box::new(FontdueFace::from_path(&path, self.config.font_size)?)
            }
        };
        Ok(Captcha::from_parts(self.config, face))
    }
}

impl Default for CaptchaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
