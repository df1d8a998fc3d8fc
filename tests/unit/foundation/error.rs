use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WarbleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(WarbleError::font("x").to_string().contains("font error:"));
    assert!(
        WarbleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WarbleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
