//! Pressure estimator
//!
//! Converts rider and equipment parameters into a front/rear recommendation.
//! The computation is pure: it reads only the request and the owned table.

use crate::models::{PressureRequest, PressureResult, PressureWarning, RimType};

use super::table::PressureTable;
use super::units::round_to_tenth;

/// Front/rear pair of values in psi
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxlePressures {
    pub front: f64,
    pub rear: f64,
}

impl AxlePressures {
    fn scale(self, factor: f64) -> Self {
        Self {
            front: self.front * factor,
            rear: self.rear * factor,
        }
    }

    fn max(&self) -> f64 {
        self.front.max(self.rear)
    }
}

/// Stateless pressure estimator over an immutable constant table
#[derive(Debug, Clone, Default)]
pub struct PressureEstimator {
    table: PressureTable,
}

impl PressureEstimator {
    pub fn new(table: PressureTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PressureTable {
        &self.table
    }

    /// Load-based pressure for each wheel before the style/rim multipliers
    pub fn base_pressures(&self, request: &PressureRequest) -> AxlePressures {
        let total_kg = request.total_mass_kg();
        let front_kg = total_kg * self.table.axle_split.front;
        let rear_kg = total_kg * self.table.axle_split.rear;

        AxlePressures {
            front: front_kg / request.front_tire_width
                * self.table.width_factor(request.front_tire_width),
            rear: rear_kg / request.rear_tire_width
                * self.table.width_factor(request.rear_tire_width),
        }
    }

    /// Unclamped recommendation in psi, after style and rim multipliers
    pub fn raw_pressures(&self, request: &PressureRequest) -> AxlePressures {
        self.base_pressures(request)
            .scale(self.table.style_multiplier(request.ride_style))
            .scale(self.table.rim_multiplier(request.rim_type))
    }

    pub fn max_pressure_psi(&self, rim_type: RimType) -> f64 {
        self.table.max_pressure_psi(rim_type)
    }

    /// Estimate the recommended pressures.
    ///
    /// The request must already satisfy `PressureRequest::validate`.
    pub fn estimate(&self, request: &PressureRequest) -> PressureResult {
        let mut psi = self.raw_pressures(request);
        let mut warning = None;

        let front_ok = self
            .table
            .is_rim_compatible(request.front_tire_width, request.inner_rim_width);
        let rear_ok = self
            .table
            .is_rim_compatible(request.rear_tire_width, request.inner_rim_width);
        if !front_ok || !rear_ok {
            warning = Some(PressureWarning::RimIncompatible);
        }

        // The cap warning replaces the compatibility warning
        let cap = self.table.max_pressure_psi(request.rim_type);
        if psi.max() > cap {
            tracing::warn!(
                front_psi = psi.front,
                rear_psi = psi.rear,
                cap_psi = cap,
                rim_type = request.rim_type.as_str(),
                "Suggested pressure exceeds rim rating, clamping"
            );
            warning = Some(PressureWarning::ExceedsRimRating);
            psi = AxlePressures {
                front: psi.front.min(cap),
                rear: psi.rear.min(cap),
            };
        }

        let unit = request.pressure_unit;
        let result = PressureResult {
            front: round_to_tenth(unit.from_psi(psi.front)),
            rear: round_to_tenth(unit.from_psi(psi.rear)),
            warning,
        };

        tracing::debug!(
            ride_style = request.ride_style.as_str(),
            rim_type = request.rim_type.as_str(),
            total_mass_kg = request.total_mass_kg(),
            front = result.front,
            rear = result.rear,
            unit = unit.as_str(),
            warning = result.warning.map(|w| w.as_str()),
            "Estimated tire pressure"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RideStyle;
    use crate::pressure::{MassUnit, PressureUnit, BAR_PER_PSI};

    fn gravel_40() -> PressureRequest {
        PressureRequest {
            ride_style: RideStyle::Gravel,
            front_tire_width: 40.0,
            rear_tire_width: 40.0,
            inner_rim_width: 25.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_gravel_no_warning() {
        let result = PressureEstimator::default().estimate(&gravel_40());
        assert_eq!(result.front, 34.7);
        assert_eq!(result.rear, 47.9);
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_gravel_in_bar() {
        let req = gravel_40().with_pressure_unit(PressureUnit::Bar);
        let result = PressureEstimator::default().estimate(&req);
        assert_eq!(result.front, 2.4);
        assert_eq!(result.rear, 3.3);
    }

    #[test]
    fn test_default_road_setup_clamps_rear() {
        // 75 + 8 kg on 25 mm hooked rims: rear raw is ~133.4 psi
        let est = PressureEstimator::default();
        let req = PressureRequest::default();
        let raw = est.raw_pressures(&req);
        assert!((raw.front - 96.63192).abs() < 1e-6);
        assert!((raw.rear - 133.44408).abs() < 1e-6);

        let result = est.estimate(&req);
        assert_eq!(result.front, 96.6);
        assert_eq!(result.rear, 120.0);
        assert_eq!(result.warning, Some(PressureWarning::ExceedsRimRating));
    }

    #[test]
    fn test_default_road_setup_compatible_rim() {
        // 19 mm sits inside [12.5, 20] for a 25 mm tire
        let est = PressureEstimator::default();
        assert!(est.table().is_rim_compatible(25.0, 19.0));

        // Lighter rider stays under the cap, so no warning at all
        let req = PressureRequest {
            rider_mass: 60.0,
            bike_mass: 7.0,
            ..Default::default()
        };
        let result = est.estimate(&req);
        assert!(result.rear <= 120.0);
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_hookless_cap_scenario() {
        let req = PressureRequest {
            front_tire_width: 20.0,
            rear_tire_width: 20.0,
            rim_type: RimType::Hookless,
            ..Default::default()
        };
        let result = PressureEstimator::default().estimate(&req);
        assert_eq!(result.front, 72.0);
        assert_eq!(result.rear, 72.0);
        assert_eq!(result.warning, Some(PressureWarning::ExceedsRimRating));
        assert_eq!(
            result.warning_message(),
            Some("Suggested tire pressure exceeds rim pressure rating. Please select a larger tire size.")
        );

        let bar = PressureEstimator::default().estimate(&req.with_pressure_unit(PressureUnit::Bar));
        assert_eq!(bar.front, 5.0);
        assert_eq!(bar.rear, 5.0);
    }

    #[test]
    fn test_clamped_bar_is_rounded_cap() {
        let req = PressureRequest {
            front_tire_width: 20.0,
            rear_tire_width: 20.0,
            rim_type: RimType::Hookless,
            pressure_unit: PressureUnit::Bar,
            ..Default::default()
        };
        let result = PressureEstimator::default().estimate(&req);
        let exact_cap_bar = 72.0 * BAR_PER_PSI;

        // Clamped in psi, then converted and rounded
        assert_eq!(result.rear, round_to_tenth(exact_cap_bar));
        assert!(result.rear > exact_cap_bar);
        assert!(result.rear - exact_cap_bar < 0.05);
    }

    #[test]
    fn test_compatibility_warning() {
        let req = PressureRequest {
            inner_rim_width: 19.0,
            ..gravel_40()
        };
        let result = PressureEstimator::default().estimate(&req);
        assert_eq!(result.warning, Some(PressureWarning::RimIncompatible));
        assert_eq!(
            result.warning_message(),
            Some("Selected tire width may be incompatible with rim width. Please verify compatibility.")
        );
        // Pressures are unaffected by the compatibility check
        assert_eq!(result.front, 34.7);
        assert_eq!(result.rear, 47.9);
    }

    #[test]
    fn test_compatibility_checks_each_wheel() {
        // Rim fits the 40 mm front but not the 25 mm rear
        let req = PressureRequest {
            rear_tire_width: 25.0,
            inner_rim_width: 22.0,
            ..gravel_40()
        };
        let result = PressureEstimator::default().estimate(&req);
        assert_eq!(result.warning, Some(PressureWarning::RimIncompatible));
    }

    #[test]
    fn test_cap_overrides_compatibility() {
        // 19 mm is outside [10, 16] for 20 mm tires, and the cap also trips
        let req = PressureRequest {
            front_tire_width: 20.0,
            rear_tire_width: 20.0,
            inner_rim_width: 19.0,
            rim_type: RimType::Hookless,
            ..Default::default()
        };
        let result = PressureEstimator::default().estimate(&req);
        assert_eq!(result.warning, Some(PressureWarning::ExceedsRimRating));
    }

    #[test]
    fn test_deterministic() {
        let est = PressureEstimator::default();
        let req = gravel_40();
        let first = est.estimate(&req);
        for _ in 0..10 {
            let again = est.estimate(&req);
            assert_eq!(first.front.to_bits(), again.front.to_bits());
            assert_eq!(first.rear.to_bits(), again.rear.to_bits());
            assert_eq!(first.warning, again.warning);
        }
    }

    #[test]
    fn test_psi_to_bar_matches_direct_bar() {
        let est = PressureEstimator::default();
        for style in RideStyle::ALL {
            for rim in RimType::ALL {
                let req = PressureRequest { ride_style: style, rim_type: rim, ..gravel_40() };
                let psi = est.estimate(&req);
                let bar = est.estimate(&req.with_pressure_unit(PressureUnit::Bar));
                assert!((psi.front * BAR_PER_PSI - bar.front).abs() <= 0.1);
                assert!((psi.rear * BAR_PER_PSI - bar.rear).abs() <= 0.1);
            }
        }
    }

    #[test]
    fn test_lbs_matches_kg() {
        let est = PressureEstimator::default();
        let kg = gravel_40();
        let lbs = PressureRequest {
            rider_mass: kg.rider_mass / 0.453592,
            bike_mass: kg.bike_mass / 0.453592,
            mass_unit: MassUnit::Lbs,
            ..kg
        };
        let a = est.estimate(&kg);
        let b = est.estimate(&lbs);
        assert!((a.front - b.front).abs() <= 0.1);
        assert!((a.rear - b.rear).abs() <= 0.1);
        assert_eq!(a.warning, b.warning);
    }

    #[test]
    fn test_rougher_style_lowers_pressure() {
        let est = PressureEstimator::default();
        let base = PressureRequest {
            front_tire_width: 55.0,
            rear_tire_width: 55.0,
            inner_rim_width: 30.0,
            rim_type: RimType::Tubes,
            ..Default::default()
        };
        let results: Vec<PressureResult> = RideStyle::ALL
            .iter()
            .map(|s| est.estimate(&PressureRequest { ride_style: *s, ..base }))
            .collect();

        assert_eq!((results[0].front, results[0].rear), (23.7, 32.7));
        assert_eq!((results[5].front, results[5].rear), (9.7, 13.4));
        for pair in results.windows(2) {
            assert!(pair[0].front > pair[1].front);
            assert!(pair[0].rear > pair[1].rear);
        }
    }

    #[test]
    fn test_never_exceeds_cap() {
        let est = PressureEstimator::default();
        for rim in RimType::ALL {
            let cap = est.max_pressure_psi(rim);
            for width in [20.0, 23.0, 25.0, 28.0, 32.0, 40.0, 50.0, 65.0] {
                for rider in [40.0, 75.0, 110.0, 150.0] {
                    let req = PressureRequest {
                        rider_mass: rider,
                        front_tire_width: width,
                        rear_tire_width: width,
                        rim_type: rim,
                        ..Default::default()
                    };
                    let result = est.estimate(&req);
                    assert!(result.front >= 0.0 && result.front <= cap);
                    assert!(result.rear >= 0.0 && result.rear <= cap);
                    if est.raw_pressures(&req).max() > cap {
                        assert_eq!(result.warning, Some(PressureWarning::ExceedsRimRating));
                    }
                }
            }
        }
    }

    #[test]
    fn test_custom_table() {
        let mut table = PressureTable::default();
        table.caps.standard_psi = 200.0;
        let est = PressureEstimator::new(table);
        let result = est.estimate(&PressureRequest::default());
        assert_eq!(result.rear, 133.4);
        assert_eq!(result.warning, None);
    }
}
