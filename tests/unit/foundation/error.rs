use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HausError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(HausError::load("x").to_string().contains("load error:"));
    assert!(HausError::render("x").to_string().contains("render error:"));
    assert!(
        HausError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = HausError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
