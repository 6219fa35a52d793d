//! Catalog MCP Tools
//!
//! Option lists the calculator form is built from.

use serde::Serialize;

use crate::models::{
    rim_width_chart as chart_rows, InputRange, PressureRequest, RideStyle, RimChartRow, RimType,
    BIKE_MASS_RANGE, RIDER_MASS_RANGE, RIM_WIDTH_RANGE, TIRE_MODELS, TIRE_WIDTH_RANGE,
};
use crate::pressure::PressureEstimator;

/// Ride style option
#[derive(Debug, Serialize)]
pub struct RideStyleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub multiplier: f64,
}

/// Response for list_ride_styles
#[derive(Debug, Serialize)]
pub struct ListRideStylesResponse {
    pub ride_styles: Vec<RideStyleOption>,
}

/// Rim type option
#[derive(Debug, Serialize)]
pub struct RimTypeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub multiplier: f64,
    pub max_pressure_psi: f64,
}

/// Response for list_rim_types
#[derive(Debug, Serialize)]
pub struct ListRimTypesResponse {
    pub rim_types: Vec<RimTypeOption>,
}

/// Response for list_tires
#[derive(Debug, Serialize)]
pub struct ListTiresResponse {
    pub tires: Vec<&'static str>,
    pub total: usize,
    pub note: &'static str,
}

/// Response for rim_width_chart
#[derive(Debug, Serialize)]
pub struct RimWidthChartResponse {
    pub rim_type: &'static str,
    pub unit: &'static str,
    pub rows: Vec<RimChartRow>,
}

/// Slider ranges for the numeric inputs
#[derive(Debug, Serialize)]
pub struct InputRanges {
    pub rider_mass: InputRange,
    pub bike_mass: InputRange,
    pub tire_width_mm: InputRange,
    pub inner_rim_width_mm: InputRange,
}

/// Response for calculator_defaults
#[derive(Debug, Serialize)]
pub struct CalculatorDefaultsResponse {
    pub defaults: PressureRequest,
    pub front_tire: &'static str,
    pub rear_tire: &'static str,
    pub ranges: InputRanges,
}

pub fn list_ride_styles(estimator: &PressureEstimator) -> ListRideStylesResponse {
    let table = estimator.table();
    ListRideStylesResponse {
        ride_styles: RideStyle::ALL
            .iter()
            .map(|s| RideStyleOption {
                value: s.as_str(),
                label: s.display_name(),
                multiplier: table.style_multiplier(*s),
            })
            .collect(),
    }
}

pub fn list_rim_types(estimator: &PressureEstimator) -> ListRimTypesResponse {
    let table = estimator.table();
    ListRimTypesResponse {
        rim_types: RimType::ALL
            .iter()
            .map(|r| RimTypeOption {
                value: r.as_str(),
                label: r.display_name(),
                multiplier: table.rim_multiplier(*r),
                max_pressure_psi: table.max_pressure_psi(*r),
            })
            .collect(),
    }
}

pub fn list_tires() -> ListTiresResponse {
    ListTiresResponse {
        tires: TIRE_MODELS.to_vec(),
        total: TIRE_MODELS.len(),
        note: "Tire model is informational; the estimate depends on tire width only.",
    }
}

pub fn rim_width_chart() -> RimWidthChartResponse {
    RimWidthChartResponse {
        rim_type: "Clincher (hooked)",
        unit: "mm",
        rows: chart_rows(),
    }
}

pub fn calculator_defaults() -> CalculatorDefaultsResponse {
    CalculatorDefaultsResponse {
        defaults: PressureRequest::default(),
        front_tire: TIRE_MODELS[0],
        rear_tire: TIRE_MODELS[0],
        ranges: InputRanges {
            rider_mass: RIDER_MASS_RANGE,
            bike_mass: BIKE_MASS_RANGE,
            tire_width_mm: TIRE_WIDTH_RANGE,
            inner_rim_width_mm: RIM_WIDTH_RANGE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_ride_styles() {
        let resp = list_ride_styles(&PressureEstimator::default());
        assert_eq!(resp.ride_styles.len(), 6);
        assert_eq!(resp.ride_styles[2].value, "mtb-xc");
        assert_eq!(resp.ride_styles[2].label, "MTB Cross Country");
        assert_eq!(resp.ride_styles[2].multiplier, 0.7);
    }

    #[test]
    fn test_list_rim_types() {
        let resp = list_rim_types(&PressureEstimator::default());
        let hookless = resp.rim_types.iter().find(|r| r.value == "hookless").unwrap();
        assert_eq!(hookless.max_pressure_psi, 72.0);
        assert_eq!(hookless.label, "Hookless (Tubeless Straight Side)");
    }

    #[test]
    fn test_list_tires() {
        let resp = list_tires();
        assert_eq!(resp.total, 13);
        assert_eq!(resp.tires[0], "Eagle F1R");
    }

    #[test]
    fn test_calculator_defaults_serialize() {
        let json = serde_json::to_value(calculator_defaults()).unwrap();
        assert_eq!(json["defaults"]["rider_mass"], 75.0);
        assert_eq!(json["defaults"]["rim_type"], "hooks");
        assert_eq!(json["ranges"]["tire_width_mm"]["max"], 65.0);
    }
}
