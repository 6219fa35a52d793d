//! Rim/tire width compatibility
//!
//! Per-wheel view of the band check the estimator folds into its warning.

use serde::Serialize;

use super::table::PressureTable;

/// Acceptable inner rim width band for one tire
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelCompatibility {
    pub tire_width: f64,
    pub min_rim_width: f64,
    pub max_rim_width: f64,
    pub compatible: bool,
}

/// Compatibility of a single inner rim width against both tires
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RimCompatibility {
    pub inner_rim_width: f64,
    pub front: WheelCompatibility,
    pub rear: WheelCompatibility,
}

impl RimCompatibility {
    pub fn is_compatible(&self) -> bool {
        self.front.compatible && self.rear.compatible
    }
}

fn wheel(table: &PressureTable, tire_width: f64, inner_rim_width: f64) -> WheelCompatibility {
    let (min_rim_width, max_rim_width) = table.rim_band_for(tire_width);
    WheelCompatibility {
        tire_width,
        min_rim_width,
        max_rim_width,
        compatible: table.is_rim_compatible(tire_width, inner_rim_width),
    }
}

pub fn check_rim_compatibility(
    table: &PressureTable,
    front_tire_width: f64,
    rear_tire_width: f64,
    inner_rim_width: f64,
) -> RimCompatibility {
    RimCompatibility {
        inner_rim_width,
        front: wheel(table, front_tire_width, inner_rim_width),
        rear: wheel(table, rear_tire_width, inner_rim_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_widths() {
        let table = PressureTable::default();
        let c = check_rim_compatibility(&table, 40.0, 25.0, 22.0);
        assert!(c.front.compatible);
        assert_eq!((c.front.min_rim_width, c.front.max_rim_width), (20.0, 32.0));
        assert!(!c.rear.compatible);
        assert_eq!(c.rear.max_rim_width, 20.0);
        assert!(!c.is_compatible());
    }

    #[test]
    fn test_band_edges() {
        let table = PressureTable::default();
        assert!(check_rim_compatibility(&table, 25.0, 25.0, 20.0).is_compatible());
        assert!(check_rim_compatibility(&table, 25.0, 25.0, 12.5).is_compatible());
        assert!(!check_rim_compatibility(&table, 25.0, 25.0, 12.4).is_compatible());
    }
}
