//! Unit types and conversion constants
//!
//! Mass and pressure units accepted by the calculator, with the conversion
//! factors used to normalize to kilograms and psi.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Bar per psi
pub const BAR_PER_PSI: f64 = 0.0689476;

/// Unit the rider and bike mass are entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    Kg,
    Lbs,
}

impl MassUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassUnit::Kg => "kg",
            MassUnit::Lbs => "lbs",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(MassUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Some(MassUnit::Lbs),
            _ => None,
        }
    }

    /// Convert a mass in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            MassUnit::Kg => value,
            MassUnit::Lbs => value * KG_PER_LB,
        }
    }
}

/// Unit the recommended pressure is reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    Psi,
    Bar,
}

impl PressureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureUnit::Psi => "psi",
            PressureUnit::Bar => "bar",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "psi" => Some(PressureUnit::Psi),
            "bar" => Some(PressureUnit::Bar),
            _ => None,
        }
    }

    /// Convert a pressure in psi to this unit
    pub fn from_psi(&self, psi: f64) -> f64 {
        match self {
            PressureUnit::Psi => psi,
            PressureUnit::Bar => psi * BAR_PER_PSI,
        }
    }

    /// Convert a pressure in this unit to psi
    pub fn to_psi(&self, value: f64) -> f64 {
        match self {
            PressureUnit::Psi => value,
            PressureUnit::Bar => value / BAR_PER_PSI,
        }
    }
}

/// Round to one decimal place, half away from zero
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a pressure between units, rounded for display
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    if from == to {
        return round_to_tenth(value);
    }
    round_to_tenth(to.from_psi(from.to_psi(value)))
}
