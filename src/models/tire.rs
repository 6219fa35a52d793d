//! Tire catalog model
//!
//! Tire lines offered in the calculator's selectors and the optimal rim
//! width chart shown on product pages.

use serde::Serialize;

/// Tire lines selectable for front and rear
pub const TIRE_MODELS: [&str; 13] = [
    "Eagle F1R",
    "Eagle F1",
    "Eagle F1 SuperSport R",
    "Vector R NSW",
    "Vector 4Seasons",
    "Transit Speed",
    "Transit Tour",
    "Connector Slick",
    "Connector Speed",
    "Peak SL",
    "Escape Inter",
    "Newton MTF Trail",
    "Wrangler MTF Enduro",
];

/// Input guidance for a numeric calculator field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Slider ranges for the numeric inputs
pub const RIDER_MASS_RANGE: InputRange = InputRange { min: 40.0, max: 150.0 };
pub const BIKE_MASS_RANGE: InputRange = InputRange { min: 5.0, max: 20.0 };
pub const TIRE_WIDTH_RANGE: InputRange = InputRange { min: 20.0, max: 65.0 };
pub const RIM_WIDTH_RANGE: InputRange = InputRange { min: 15.0, max: 35.0 };

/// Case-insensitive lookup of a tire line, returning its canonical name
pub fn find_tire_model(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    TIRE_MODELS
        .iter()
        .copied()
        .find(|model| model.to_lowercase() == wanted)
}

/// One row of the optimal rim width chart
#[derive(Debug, Clone, Serialize)]
pub struct RimChartRow {
    /// ETRTO and conventional size, e.g. "40-622 | 700x40"
    pub tire_size: &'static str,
    /// Compatible inner rim widths in mm
    pub rim_widths: Vec<u32>,
    pub optimal_rim_width: u32,
}

impl RimChartRow {
    fn new(tire_size: &'static str, max_width: u32, optimal_rim_width: u32) -> Self {
        Self {
            tire_size,
            rim_widths: (CHART_MIN_RIM_WIDTH..=max_width).collect(),
            optimal_rim_width,
        }
    }
}

const CHART_MIN_RIM_WIDTH: u32 = 17;

/// Hooked clincher rim chart
pub fn rim_width_chart() -> Vec<RimChartRow> {
    vec![
        RimChartRow::new("35-622 | 700x35", 27, 23),
        RimChartRow::new("40-622 | 700x40", 27, 23),
        RimChartRow::new("50-622 | 700x50", 30, 25),
        RimChartRow::new("50-584 | 27.5x2.0", 30, 25),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tire_model() {
        assert_eq!(find_tire_model("peak sl"), Some("Peak SL"));
        assert_eq!(find_tire_model(" Eagle F1R "), Some("Eagle F1R"));
        assert_eq!(find_tire_model("Eagle F2"), None);
    }

    #[test]
    fn test_rim_chart_optimal_within_widths() {
        for row in rim_width_chart() {
            assert!(row.rim_widths.contains(&row.optimal_rim_width), "{}", row.tire_size);
            assert_eq!(row.rim_widths.first(), Some(&17));
        }
    }

    #[test]
    fn test_rim_chart_shape() {
        let chart = rim_width_chart();
        assert_eq!(chart.len(), 4);
        assert_eq!(chart[0].rim_widths.len(), 11);
        assert_eq!(chart[2].rim_widths.last(), Some(&30));
    }

    #[test]
    fn test_input_ranges_hold_defaults() {
        assert!(RIDER_MASS_RANGE.contains(75.0));
        assert!(BIKE_MASS_RANGE.contains(8.0));
        assert!(TIRE_WIDTH_RANGE.contains(25.0));
        assert!(RIM_WIDTH_RANGE.contains(19.0));
        assert!(!RIM_WIDTH_RANGE.contains(40.0));
    }
}
