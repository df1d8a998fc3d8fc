//! Warble renders distorted-text captcha images.
//!
//! A configured [`Captcha`] generator turns a font face plus a random source
//! into `(RgbaImage, String)` pairs: the raster challenge and the plaintext
//! code it encodes.
//!
//! # Pipeline overview
//!
//! 1. **Code**: sample a length and draw characters from the charset
//! 2. **Glyphs**: rasterize each character, then scale, warp, and rotate it
//! 3. **Compose**: lay the glyphs out with random spacing and vertical jitter
//! 4. **Assemble**: center onto the background, speckle noise, draw line
//!    artifacts
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: every stochastic decision draws from the
//!   caller's `rand::Rng` handle, so seeded generations are reproducible.
//! - **Pluggable text backend**: the pipeline depends only on the
//!   [`FontFace`] trait; [`FontdueFace`] is the production implementation.
//! - **No IO at generation time**: font loading happens once in
//!   [`CaptchaBuilder::build`]; generation is infallible.
//!
//! # Getting started
//!
//! ```no_run
//! use warble::Captcha;
//!
//! # fn main() -> warble::WarbleResult<()> {
//! let captcha = Captcha::builder()
//!     .font_path("fonts/DejaVuSans.ttf")
//!     .rotation(-15.0, 15.0)
//!     .distortion(2.0, 4.0)
//!     .build()?;
//! let (image, code) = captcha.generate();
//! assert_eq!(code.len(), 4);
//! # let _ = image;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod font;
mod foundation;
mod generator;
mod render;

pub use config::builder::CaptchaBuilder;
pub use config::model::{CaptchaConfig, charsets};
pub use font::face::{FontFace, GlyphMetrics};
pub use font::fontdue_face::FontdueFace;
pub use foundation::error::{WarbleError, WarbleResult};
pub use foundation::math::{Interval, lerp};
pub use foundation::raster::{PixelRect, crop_to_bounds, near_color, tight_bounds};
pub use generator::Captcha;
