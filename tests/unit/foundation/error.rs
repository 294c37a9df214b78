use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PalError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PalError::source("x").to_string().contains("source error:"));
    assert!(
        PalError::truncated("x")
            .to_string()
            .contains("truncated stream:")
    );
}

#[test]
fn bounds_are_reported_in_messages() {
    let err = PalError::ResolutionExceeded {
        width: 400,
        height: 300,
        max_width: 384,
        max_height: 216,
    };
    assert_eq!(
        err.to_string(),
        "resolution 400x300 exceeds maximum 384x216"
    );

    let err = PalError::InsufficientSamples {
        needed: 100,
        available: 12,
    };
    assert!(err.to_string().contains("needed 100, available 12"));

    let err = PalError::malformed(6, "zero-length run");
    assert_eq!(
        err.to_string(),
        "malformed run record at byte 6: zero-length run"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PalError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert() {
    fn fails() -> PalResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(PalError::Io(_))));
}
