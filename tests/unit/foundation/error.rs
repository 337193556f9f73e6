use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FourierError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FourierError::render("x").to_string().contains("render error:"));
    assert!(FourierError::encode("x").to_string().contains("encode error:"));
    assert!(
        FourierError::InvalidHarmonicCount(-3)
            .to_string()
            .contains("-3")
    );
}

#[test]
fn interval_error_names_both_bounds() {
    let err = FourierError::InvalidInterval {
        lower: 2.0,
        upper: 1.0,
    };
    let msg = err.to_string();
    assert!(msg.contains("invalid interval"));
    assert!(msg.contains('2') && msg.contains('1'));
}

#[test]
fn quadrature_errors_convert_into_integration_failure() {
    let err: FourierError = QuadratureError::NonFinite { x: 0.5 }.into();
    assert!(matches!(err, FourierError::IntegrationFailure(_)));
    assert!(err.to_string().starts_with("integration failure:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FourierError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
