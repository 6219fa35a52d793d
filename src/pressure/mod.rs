//! Tire pressure calculation module
//!
//! The estimate formula, its constant table, and unit conversions.

pub mod compatibility;
pub mod estimator;
pub mod table;
pub mod units;

pub use compatibility::{check_rim_compatibility, RimCompatibility, WheelCompatibility};
pub use estimator::{AxlePressures, PressureEstimator};
pub use table::PressureTable;
pub use units::{
    convert_pressure, round_to_tenth, MassUnit, PressureUnit, BAR_PER_PSI, KG_PER_LB,
};
