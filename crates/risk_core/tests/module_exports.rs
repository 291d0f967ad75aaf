//! Integration tests for module exports.
//!
//! Verifies that the public modules and re-exports resolve via absolute paths.

#[test]
fn test_distribution_exports() {
    use risk_core::math::distributions::{norm_cdf, norm_pdf};
    use risk_core::math::{norm_cdf as cdf_reexport, norm_pdf as pdf_reexport};

    assert_eq!(norm_cdf(0.3_f64), cdf_reexport(0.3_f64));
    assert_eq!(norm_pdf(0.3_f64), pdf_reexport(0.3_f64));
}

#[test]
fn test_time_exports() {
    use risk_core::types::time::Date as TimeDate;
    use risk_core::types::{Date, DateError, DAYS_PER_YEAR};

    let date: Date = TimeDate::from_ymd(2025, 6, 20).unwrap();
    assert_eq!(DAYS_PER_YEAR, 365.0);
    assert!(matches!(
        Date::from_ymd(2025, 6, 31),
        Err(DateError::InvalidDate { .. })
    ));
    assert_eq!(date.to_string(), "2025-06-20");
}
