//! Pressure request model
//!
//! The nine inputs of a pressure estimate, plus the boundary validation that
//! callers run before handing a request to the estimator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{RideStyle, RimType};
use crate::pressure::{MassUnit, PressureUnit};

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Unknown {field}: '{value}' (expected one of: {expected})")]
    UnknownValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Check that a value is finite and strictly positive
pub fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

/// Check that a value is finite and not negative
pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

/// Parse a boundary string with an enum's `from_str`, naming the field on failure
pub fn parse_choice<T>(
    field: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
    expected: &[&str],
) -> Result<T, ValidationError> {
    parse(value).ok_or_else(|| ValidationError::UnknownValue {
        field,
        value: value.to_string(),
        expected: expected.join(", "),
    })
}

/// A fully populated pressure estimate request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureRequest {
    pub rider_mass: f64,
    pub bike_mass: f64,
    pub mass_unit: MassUnit,
    pub ride_style: RideStyle,
    pub front_tire_width: f64,
    pub rear_tire_width: f64,
    pub inner_rim_width: f64,
    pub rim_type: RimType,
    pub pressure_unit: PressureUnit,
}

impl Default for PressureRequest {
    /// The calculator's initial form state
    fn default() -> Self {
        Self {
            rider_mass: 75.0,
            bike_mass: 8.0,
            mass_unit: MassUnit::Kg,
            ride_style: RideStyle::Road,
            front_tire_width: 25.0,
            rear_tire_width: 25.0,
            inner_rim_width: 19.0,
            rim_type: RimType::Hooks,
            pressure_unit: PressureUnit::Psi,
        }
    }
}

impl PressureRequest {
    /// Reject non-finite or non-positive numeric fields.
    ///
    /// The estimator assumes this has passed; it performs no checks itself.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("rider_mass", self.rider_mass)?;
        require_positive("bike_mass", self.bike_mass)?;
        require_positive("front_tire_width", self.front_tire_width)?;
        require_positive("rear_tire_width", self.rear_tire_width)?;
        require_positive("inner_rim_width", self.inner_rim_width)?;
        Ok(())
    }

    /// Same request with a different output unit
    pub fn with_pressure_unit(mut self, unit: PressureUnit) -> Self {
        self.pressure_unit = unit;
        self
    }

    /// Same request with a different rider mass
    pub fn with_rider_mass(mut self, rider_mass: f64) -> Self {
        self.rider_mass = rider_mass;
        self
    }

    /// Total system mass in kilograms
    pub fn total_mass_kg(&self) -> f64 {
        self.mass_unit.to_kg(self.rider_mass) + self.mass_unit.to_kg(self.bike_mass)
    }
}
