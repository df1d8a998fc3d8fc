use crate::foundation::error::{WarbleError, WarbleResult};
use crate::foundation::math::Interval;

/// Predefined character sets for captcha codes.
pub mod charsets {
    /// Lowercase ASCII letters.
    pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
    /// Uppercase ASCII letters.
    pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    /// Lower- and uppercase ASCII letters.
    pub const ALPHABETIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    /// Decimal digits.
    pub const NUMERIC: &str = "0123456789";
    /// Lowercase hexadecimal digits.
    pub const HEX: &str = "0123456789abcdef";
    /// Lowercase letters and digits.
    pub const LOWER_NUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
    /// Uppercase letters and digits.
    pub const UPPER_NUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    /// Letters and digits.
    pub const ALPHA_NUMERIC: &str =
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    /// Letters and digits with visually confusable characters removed
    /// (`0`/`O`, `1`/`l`/`I`, and friends).
    pub const ALPHA_NUMERIC_CLEAR: &str =
        "ABCDEFGHKLMNPQRSTUVWXYZabcdefghkmnpqsuvwxyz23456789";
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tunable parameters for captcha generation.
///
/// A configuration is a pure data model that can be built programmatically
/// (see [`crate::CaptchaBuilder`]) or serialized/deserialized via Serde
/// (JSON). It is validated once when the generator is built and read-only
/// thereafter; the font resource itself lives beside the configuration on
/// the generator, not in it.
pub struct CaptchaConfig {
    /// Output canvas width in pixels.
    pub width: u32,
    /// Output canvas height in pixels.
    pub height: u32,
    /// Characters the code is drawn from.
    pub charset: String,
    /// Inclusive bounds for the code length.
    pub length: Interval<usize>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text color as straight-alpha RGBA8.
    pub foreground: [u8; 4],
    /// Background fill as straight-alpha RGBA8.
    pub background: [u8; 4],
    /// Per-character horizontal advance factor.
    pub spacing: Interval<f64>,
    /// Per-character rotation in degrees, within `[-180, 180]`.
    pub rotation: Interval<f64>,
    /// Per-character scale factor bounds.
    pub scale: Interval<f64>,
    /// Per-character sinusoidal warp amplitude bounds, in pixels.
    pub distortion: Interval<f64>,
    /// Inclusive bounds for the number of line artifacts.
    pub lines: Interval<u32>,
    /// Fraction of canvas pixels speckled with the foreground color, in `[0, 1]`.
    pub noise_level: f64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 50,
            charset: charsets::ALPHA_NUMERIC_CLEAR.to_string(),
            length: Interval::fixed(4),
            font_size: 36.0,
            foreground: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
            spacing: Interval::fixed(1.0),
            rotation: Interval::fixed(0.0),
            scale: Interval::fixed(1.0),
            distortion: Interval::fixed(0.0),
            lines: Interval::new(3, 7),
            noise_level: 0.1,
        }
    }
}

impl CaptchaConfig {
    /// Check every tunable against its documented range.
    pub fn validate(&self) -> WarbleResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WarbleError::validation("width and height must be > 0"));
        }
        if self.charset.is_empty() {
            return Err(WarbleError::validation("charset must be non-empty"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(WarbleError::validation("font size must be finite and > 0"));
        }
        if self.length.min > self.length.max {
            return Err(WarbleError::validation("length range must have min <= max"));
        }
        for (name, range) in [
            ("spacing", self.spacing),
            ("scale", self.scale),
            ("distortion", self.distortion),
        ] {
            if !range.min.is_finite()
                || !range.max.is_finite()
                || range.min < 0.0
                || range.min > range.max
            {
                return Err(WarbleError::validation(format!(
                    "{name} range must be finite, >= 0, and have min <= max"
                )));
            }
        }
        if !self.rotation.min.is_finite()
            || !self.rotation.max.is_finite()
            || self.rotation.min < -180.0
            || self.rotation.max > 180.0
            || self.rotation.min > self.rotation.max
        {
            return Err(WarbleError::validation(
                "rotation range must be within [-180, 180] with min <= max",
            ));
        }
        if self.lines.min > self.lines.max {
            return Err(WarbleError::validation(
                "line count range must have min <= max",
            ));
        }
        if !self.noise_level.is_finite() || !(0.0..=1.0).contains(&self.noise_level) {
            return Err(WarbleError::validation("noise level must be within [0, 1]"));
        }
        Ok(())
    }

    /// Deserialize a configuration from JSON.
    pub fn from_json(json: &str) -> WarbleResult<Self> {
        serde_json::from_str(json).map_err(|e| WarbleError::serde(e.to_string()))
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> WarbleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WarbleError::serde(e.to_string()))
    }
}
