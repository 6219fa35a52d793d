//! Calculator MCP Tools
//!
//! Pressure estimate, rim compatibility and unit conversion.

use serde::Serialize;

use crate::models::{find_tire_model, require_non_negative, require_positive, PressureRequest};
use crate::pressure::{
    self, round_to_tenth, PressureEstimator, PressureUnit, RimCompatibility,
};

/// Response for calculate_tire_pressure
#[derive(Debug, Serialize)]
pub struct CalculatePressureResponse {
    pub front: f64,
    pub rear: f64,
    pub unit: &'static str,
    pub warning: Option<&'static str>,
    pub warning_code: Option<&'static str>,
    /// Rim rating in the requested unit
    pub max_pressure: f64,
    pub rim_compatibility: RimCompatibility,
    pub request: PressureRequest,
    /// Informational tire model names, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_tire: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_tire: Option<&'static str>,
}

/// Response for convert_pressure
#[derive(Debug, Serialize)]
pub struct ConvertPressureResponse {
    pub value: f64,
    pub from: &'static str,
    pub converted: f64,
    pub to: &'static str,
}

/// Estimate front/rear pressure for a setup
pub fn calculate_tire_pressure(
    estimator: &PressureEstimator,
    request: PressureRequest,
) -> Result<CalculatePressureResponse, String> {
    request.validate().map_err(|e| e.to_string())?;

    let result = estimator.estimate(&request);
    let rim_compatibility = pressure::check_rim_compatibility(
        estimator.table(),
        request.front_tire_width,
        request.rear_tire_width,
        request.inner_rim_width,
    );
    let max_psi = estimator.max_pressure_psi(request.rim_type);

    Ok(CalculatePressureResponse {
        front: result.front,
        rear: result.rear,
        unit: request.pressure_unit.as_str(),
        warning: result.warning_message(),
        warning_code: result.warning.map(|w| w.as_str()),
        max_pressure: round_to_tenth(request.pressure_unit.from_psi(max_psi)),
        rim_compatibility,
        request,
        front_tire: None,
        rear_tire: None,
    })
}

/// Resolve an optional tire model name to its catalog spelling
pub fn resolve_tire_model(field: &str, name: Option<&str>) -> Result<Option<&'static str>, String> {
    match name {
        None => Ok(None),
        Some(name) => find_tire_model(name)
            .map(Some)
            .ok_or_else(|| format!("Unknown {}: '{}' (see list_tires)", field, name)),
    }
}

/// Per-wheel rim band check for a single inner rim width
pub fn check_rim_compatibility(
    estimator: &PressureEstimator,
    front_tire_width: f64,
    rear_tire_width: f64,
    inner_rim_width: f64,
) -> Result<RimCompatibility, String> {
    require_positive("front_tire_width", front_tire_width).map_err(|e| e.to_string())?;
    require_positive("rear_tire_width", rear_tire_width).map_err(|e| e.to_string())?;
    require_positive("inner_rim_width", inner_rim_width).map_err(|e| e.to_string())?;

    Ok(pressure::check_rim_compatibility(
        estimator.table(),
        front_tire_width,
        rear_tire_width,
        inner_rim_width,
    ))
}

/// Convert a pressure reading between psi and bar
pub fn convert_pressure(
    value: f64,
    from: PressureUnit,
    to: PressureUnit,
) -> Result<ConvertPressureResponse, String> {
    require_non_negative("value", value).map_err(|e| e.to_string())?;

    Ok(ConvertPressureResponse {
        value,
        from: from.as_str(),
        converted: pressure::convert_pressure(value, from, to),
        to: to.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RimType;

    #[test]
    fn test_calculate_rejects_invalid_request() {
        let req = PressureRequest { rider_mass: 0.0, ..Default::default() };
        let err = calculate_tire_pressure(&PressureEstimator::default(), req).unwrap_err();
        assert_eq!(err, "rider_mass must be greater than zero, got 0");
    }

    #[test]
    fn test_calculate_reports_warning_and_cap() {
        let req = PressureRequest {
            front_tire_width: 20.0,
            rear_tire_width: 20.0,
            rim_type: RimType::Hookless,
            pressure_unit: PressureUnit::Bar,
            ..Default::default()
        };
        let resp = calculate_tire_pressure(&PressureEstimator::default(), req).unwrap();
        assert_eq!(resp.front, 5.0);
        assert_eq!(resp.max_pressure, 5.0);
        assert_eq!(resp.unit, "bar");
        assert_eq!(resp.warning_code, Some("exceeds_rim_rating"));
        assert!(!resp.rim_compatibility.is_compatible());
    }

    #[test]
    fn test_calculate_without_warning() {
        let req = PressureRequest {
            ride_style: crate::models::RideStyle::Gravel,
            front_tire_width: 40.0,
            rear_tire_width: 40.0,
            inner_rim_width: 25.0,
            ..Default::default()
        };
        let resp = calculate_tire_pressure(&PressureEstimator::default(), req).unwrap();
        assert_eq!((resp.front, resp.rear), (34.7, 47.9));
        assert_eq!(resp.warning, None);
        assert_eq!(resp.max_pressure, 120.0);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["request"]["ride_style"], "gravel");
        assert!(json["warning"].is_null());
    }

    #[test]
    fn test_check_rim_compatibility_validates() {
        let est = PressureEstimator::default();
        assert!(check_rim_compatibility(&est, 25.0, 25.0, f64::NAN).is_err());
        let c = check_rim_compatibility(&est, 25.0, 28.0, 19.0).unwrap();
        assert!(c.is_compatible());
    }

    #[test]
    fn test_resolve_tire_model() {
        assert_eq!(resolve_tire_model("front_tire", None), Ok(None));
        assert_eq!(resolve_tire_model("front_tire", Some("vector r nsw")), Ok(Some("Vector R NSW")));
        let err = resolve_tire_model("rear_tire", Some("Slick 9000")).unwrap_err();
        assert!(err.starts_with("Unknown rear_tire"));
    }

    #[test]
    fn test_convert_pressure() {
        let resp = convert_pressure(100.0, PressureUnit::Psi, PressureUnit::Bar).unwrap();
        assert_eq!(resp.converted, 6.9);
        assert_eq!(resp.to, "bar");
        assert!(convert_pressure(-1.0, PressureUnit::Psi, PressureUnit::Bar).is_err());
    }
}
