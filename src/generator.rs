use std::fmt;

use image::RgbaImage;
use rand::Rng;

use crate::config::builder::CaptchaBuilder;
use crate::config::model::CaptchaConfig;
use crate::font::face::FontFace;
use crate::render::{compose, frame};

/// A configured captcha generator.
///
/// Holds the validated, immutable configuration and the loaded font face.
/// Every generation is an independent pipeline run with no carried state,
/// so one generator can serve concurrent threads.
pub struct Captcha {
    config: CaptchaConfig,
    face: Box<dyn FontFace>,
    glyphs: Vec<char>,
}

impl Captcha {
    /// Start building a generator.
    pub fn builder() -> CaptchaBuilder {
        CaptchaBuilder::new()
    }

    pub(crate) fn from_parts(config: CaptchaConfig, face: Box<dyn FontFace>) -> Self {
        let glyphs = config.charset.chars().collect();
        Self {
            config,
            face,
            glyphs,
        }
    }

    /// The validated configuration this generator runs with.
    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }

    /// Generate one captcha with the process-wide RNG.
    pub fn generate(&self) -> (RgbaImage, String) {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate one captcha, drawing every randomized decision from `rng`.
    ///
    /// Returns the rendered frame and the plaintext code it encodes.
    #[tracing::instrument(skip(self, rng))]
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> (RgbaImage, String) {
        let code = self.random_code(rng);
        let string_canvas = compose::compose_string(self.face.as_ref(), &code, &self.config, rng);
        let image = frame::assemble(&self.config, &string_canvas, rng);
        (image, code)
    }

    /// Draw a code of sampled length, characters chosen uniformly with
    /// replacement from the charset.
    fn random_code<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let length = self.config.length.sample(rng);
        (0..length)
            .map(|_| self.glyphs[rng.gen_range(0..self.glyphs.len())])
            .collect()
    }
}

impl fmt::Debug for Captcha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Captcha")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
