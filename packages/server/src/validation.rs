//! Boundary checks applied before a payload reaches the ledger.

use campus_safety_models::{GeoPoint, LocationId};
use serde_json::Value;

use crate::error::ApiError;

/// Checks an optional `location` value.
///
/// Absent and `null` are accepted. A string must name one of the fixed
/// campus locations; an object must carry numeric `lat`/`lng` within
/// range. Anything else is rejected.
///
/// # Errors
///
/// Returns [`ApiError::InvalidLocation`] describing the problem.
pub fn check_location(location: Option<&Value>) -> Result<(), ApiError> {
    match location {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(key)) => key
            .parse::<LocationId>()
            .map(|_| ())
            .map_err(|_| ApiError::InvalidLocation(format!("unknown location '{key}'"))),
        Some(value) if value.is_object() => {
            let point: GeoPoint = serde_json::from_value(value.clone())
                .map_err(|e| ApiError::InvalidLocation(e.to_string()))?;
            if point.is_valid() {
                Ok(())
            } else {
                Err(ApiError::InvalidLocation(format!(
                    "coordinates out of range ({}, {})",
                    point.lat, point.lng
                )))
            }
        }
        Some(other) => Err(ApiError::InvalidLocation(format!(
            "expected a location id or {{lat, lng}}, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_absent_and_null() {
        assert!(check_location(None).is_ok());
        assert!(check_location(Some(&Value::Null)).is_ok());
    }

    #[test]
    fn accepts_known_location_ids() {
        assert!(check_location(Some(&json!("parking_north"))).is_ok());
        assert!(check_location(Some(&json!("academic_block_b"))).is_ok());
    }

    #[test]
    fn rejects_unknown_location_ids() {
        let err = check_location(Some(&json!("rooftop"))).unwrap_err();
        assert!(matches!(err, ApiError::InvalidLocation(_)));
    }

    #[test]
    fn accepts_coordinates_with_extra_keys() {
        let location = json!({"lat": 28.6129, "lng": 77.2295, "accuracy": 12});
        assert!(check_location(Some(&location)).is_ok());
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(check_location(Some(&json!({"lat": 95.0, "lng": 0.0}))).is_err());
        assert!(check_location(Some(&json!({"lat": "north", "lng": 0.0}))).is_err());
        assert!(check_location(Some(&json!({"lng": 77.0}))).is_err());
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(check_location(Some(&json!(42))).is_err());
        assert!(check_location(Some(&json!([28.6, 77.2]))).is_err());
    }
}
