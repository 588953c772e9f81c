use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TexgenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TexgenError::codec("x").to_string().contains("codec error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TexgenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
