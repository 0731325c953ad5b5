//! Validation utilities for the AgroLens risk service
//!
//! Field-level checks applied at the request boundary, before any upstream
//! data provider is contacted.

use chrono::NaiveDate;

// ============================================================================
// Coordinate Validations
// ============================================================================

/// Validate latitude is within [-90, 90] degrees
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() {
        return Err("Latitude must be a finite number");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90 degrees");
    }
    Ok(())
}

/// Validate longitude is within [-180, 180] degrees
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() {
        return Err("Longitude must be a finite number");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}

// ============================================================================
// Agronomic Context Validations
// ============================================================================

/// Validate a crop/soil/stage identifier is a usable label.
///
/// Identifiers are an open vocabulary: unknown values are passed through to
/// the inference model, so only emptiness and length are rejected here.
pub fn validate_identifier(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Identifier must not be empty");
    }
    if value.len() > 64 {
        return Err("Identifier must be at most 64 characters");
    }
    Ok(())
}

/// Validate a planting date against the assessment date.
///
/// A planting date in the future signals a caller error.
pub fn validate_planting_date(
    planting_date: NaiveDate,
    assessment_date: NaiveDate,
) -> Result<(), &'static str> {
    if planting_date > assessment_date {
        return Err("Planting date must not be in the future");
    }
    Ok(())
}

/// Days elapsed between planting and assessment, never negative for a
/// validated planting date.
pub fn days_since_planting(planting_date: NaiveDate, assessment_date: NaiveDate) -> i64 {
    assessment_date.signed_duration_since(planting_date).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Coordinate Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_latitude_valid() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(13.7563).is_ok());
    }

    #[test]
    fn test_validate_latitude_invalid() {
        assert!(validate_latitude(90.01).is_err());
        assert!(validate_latitude(-91.0).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_latitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_longitude_valid() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(100.5018).is_ok());
    }

    #[test]
    fn test_validate_longitude_invalid() {
        assert!(validate_longitude(180.5).is_err());
        assert!(validate_longitude(-181.0).is_err());
        assert!(validate_longitude(f64::NAN).is_err());
    }

    // ========================================================================
    // Agronomic Context Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_identifier_valid() {
        assert!(validate_identifier("wheat").is_ok());
        assert!(validate_identifier("sandy loam").is_ok());
        assert!(validate_identifier("some-unknown-cultivar").is_ok());
    }

    #[test]
    fn test_validate_identifier_invalid() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("   ").is_err());
        assert!(validate_identifier(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_planting_date_past_or_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(validate_planting_date(past, today).is_ok());
        assert!(validate_planting_date(today, today).is_ok());
    }

    #[test]
    fn test_validate_planting_date_future() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert!(validate_planting_date(future, today).is_err());
    }

    #[test]
    fn test_days_since_planting() {
        let planted = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(days_since_planting(planted, today), 30);
        assert_eq!(days_since_planting(today, today), 0);
    }
}
