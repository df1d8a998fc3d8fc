use image::{Rgba, RgbaImage};
use warble::{Captcha, CaptchaConfig, CaptchaBuilder, FontFace, GlyphMetrics, WarbleError, charsets};

struct NullFace;

impl FontFace for NullFace {
    fn measure(&self, _ch: char) -> GlyphMetrics {
        GlyphMetrics {
            advance: 4.0,
            ascent: 6.0,
            descent: 1.0,
        }
    }

    fn rasterize(
        &self,
        _ch: char,
        _canvas: &mut RgbaImage,
        _pen_x: i32,
        _baseline_y: i32,
        _color: Rgba<u8>,
    ) {
    }
}

fn assert_validation_error(result: Result<Captcha, WarbleError>, needle: &str) {
    match result {
        Err(WarbleError::Validation(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {msg}")
        }
        Err(other) => panic!("expected validation error, got: {other}"),
        Ok(_) => panic!("expected validation error, got a generator"),
    }
}

#[test]
fn build_requires_a_font_source() {
    assert_validation_error(Captcha::builder().build(), "font source");
}

#[test]
fn build_rejects_invalid_ranges() {
    assert_validation_error(
        Captcha::builder().font_face(NullFace).length(5, 2).build(),
        "length",
    );
    assert_validation_error(
        Captcha::builder()
            .font_face(NullFace)
            .rotation(-270.0, 0.0)
            .build(),
        "rotation",
    );
    assert_validation_error(
        Captcha::builder()
            .font_face(NullFace)
            .spacing(-0.5, 1.0)
            .build(),
        "spacing",
    );
    assert_validation_error(
        Captcha::builder()
            .font_face(NullFace)
            .noise_level(2.0)
            .build(),
        "noise",
    );
    assert_validation_error(
        Captcha::builder().font_face(NullFace).size(0, 50).build(),
        "width",
    );
    assert_validation_error(
        Captcha::builder().font_face(NullFace).charset("").build(),
        "charset",
    );
    assert_validation_error(
        Captcha::builder()
            .font_face(NullFace)
            .font_size(-12.0)
            .build(),
        "font size",
    );
}

#[test]
fn build_rejects_unparsable_font_bytes() {
    let result = Captcha::builder().font_bytes(vec![0u8; 32]).build();
    assert!(matches!(result, Err(WarbleError::Font(_))));
}

#[test]
fn build_surfaces_missing_font_files() {
    let err = Captcha::builder()
        .font_path("no/such/font.ttf")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("no/such/font.ttf"));
}

#[test]
fn builder_round_trips_through_json_config() {
    let json = r#"{
        "width": 240,
        "height": 80,
        "charset": "abcdef",
        "length": { "min": 5, "max": 7 },
        "rotation": { "min": -20.0, "max": 20.0 },
        "lines": { "min": 0, "max": 0 },
        "noise_level": 0.0
    }"#;
    let config = CaptchaConfig::from_json(json).unwrap();
    let captcha = CaptchaBuilder::from_config(config.clone())
        .font_face(NullFace)
        .build()
        .unwrap();
    assert_eq!(captcha.config(), &config);
    assert_eq!(CaptchaConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
}

#[test]
fn default_charset_avoids_confusable_characters() {
    for confusable in ['0', 'O', '1', 'l', 'I', 'o', 'i', 'j'] {
        assert!(
            !charsets::ALPHA_NUMERIC_CLEAR.contains(confusable),
            "charset contains {confusable}"
        );
    }
}
