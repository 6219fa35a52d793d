//! Pressure result model

use serde::{Deserialize, Serialize};

/// Advisory notice returned alongside a valid recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureWarning {
    /// Inner rim width falls outside the acceptable band for a tire
    RimIncompatible,
    /// A wheel exceeded the rim's rated maximum and was clamped
    ExceedsRimRating,
}

impl PressureWarning {
    pub fn message(&self) -> &'static str {
        match self {
            PressureWarning::RimIncompatible => {
                "Selected tire width may be incompatible with rim width. Please verify compatibility."
            }
            PressureWarning::ExceedsRimRating => {
                "Suggested tire pressure exceeds rim pressure rating. Please select a larger tire size."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PressureWarning::RimIncompatible => "rim_incompatible",
            PressureWarning::ExceedsRimRating => "exceeds_rim_rating",
        }
    }
}

/// Recommended front/rear pressure in the requested unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureResult {
    pub front: f64,
    pub rear: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<PressureWarning>,
}

impl PressureResult {
    pub fn warning_message(&self) -> Option<&'static str> {
        self.warning.map(|w| w.message())
    }
}
