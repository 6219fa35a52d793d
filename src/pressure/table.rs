//! Pressure table
//!
//! Every tunable constant of the estimate formula, held in one immutable
//! value. The built-in table is the calibrated default; a replacement can be
//! loaded from JSON at startup (see `config`).

use serde::{Deserialize, Serialize};

use crate::models::{RideStyle, RimType};

/// Share of total system mass carried by each axle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxleSplit {
    pub front: f64,
    pub rear: f64,
}

/// `max(floor, base - width * slope)`; wider tires get a smaller factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthFactor {
    pub base: f64,
    pub slope: f64,
    pub floor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleMultipliers {
    pub road: f64,
    pub gravel: f64,
    #[serde(rename = "mtb-xc")]
    pub mtb_xc: f64,
    #[serde(rename = "mtb-trail")]
    pub mtb_trail: f64,
    #[serde(rename = "mtb-enduro")]
    pub mtb_enduro: f64,
    #[serde(rename = "mtb-downhill")]
    pub mtb_downhill: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RimMultipliers {
    pub tubes: f64,
    pub tubular: f64,
    pub hooks: f64,
    pub hookless: f64,
}

/// Acceptable inner rim width as a fraction of tire width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RimBand {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

/// Rated maximum pressure in psi
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureCaps {
    pub hookless_psi: f64,
    pub standard_psi: f64,
}

/// Immutable constant table owned by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureTable {
    pub axle_split: AxleSplit,
    pub width_factor: WidthFactor,
    pub style_multipliers: StyleMultipliers,
    pub rim_multipliers: RimMultipliers,
    pub rim_band: RimBand,
    pub caps: PressureCaps,
}

impl PressureTable {
    /// The calibrated constants
    pub const BUILT_IN: PressureTable = PressureTable {
        // Front typically carries 40-45% of system mass
        axle_split: AxleSplit { front: 0.42, rear: 0.58 },
        width_factor: WidthFactor { base: 100.0, slope: 1.2, floor: 20.0 },
        style_multipliers: StyleMultipliers {
            road: 1.1,
            gravel: 0.85,
            mtb_xc: 0.7,
            mtb_trail: 0.6,
            mtb_enduro: 0.5,
            mtb_downhill: 0.45,
        },
        rim_multipliers: RimMultipliers {
            tubes: 1.0,
            tubular: 0.95,
            hooks: 0.9,
            hookless: 0.85,
        },
        rim_band: RimBand { min_ratio: 0.5, max_ratio: 0.8 },
        caps: PressureCaps { hookless_psi: 72.0, standard_psi: 120.0 },
    };

    pub fn width_factor(&self, tire_width_mm: f64) -> f64 {
        let f = &self.width_factor;
        (f.base - tire_width_mm * f.slope).max(f.floor)
    }

    pub fn style_multiplier(&self, style: RideStyle) -> f64 {
        let m = &self.style_multipliers;
        match style {
            RideStyle::Road => m.road,
            RideStyle::Gravel => m.gravel,
            RideStyle::MtbXc => m.mtb_xc,
            RideStyle::MtbTrail => m.mtb_trail,
            RideStyle::MtbEnduro => m.mtb_enduro,
            RideStyle::MtbDownhill => m.mtb_downhill,
        }
    }

    pub fn rim_multiplier(&self, rim: RimType) -> f64 {
        let m = &self.rim_multipliers;
        match rim {
            RimType::Tubes => m.tubes,
            RimType::Tubular => m.tubular,
            RimType::Hooks => m.hooks,
            RimType::Hookless => m.hookless,
        }
    }

    pub fn max_pressure_psi(&self, rim: RimType) -> f64 {
        match rim {
            RimType::Hookless => self.caps.hookless_psi,
            _ => self.caps.standard_psi,
        }
    }

    /// Inclusive `(min, max)` inner rim width for a tire
    pub fn rim_band_for(&self, tire_width_mm: f64) -> (f64, f64) {
        (
            tire_width_mm * self.rim_band.min_ratio,
            tire_width_mm * self.rim_band.max_ratio,
        )
    }

    pub fn is_rim_compatible(&self, tire_width_mm: f64, inner_rim_width_mm: f64) -> bool {
        let (min, max) = self.rim_band_for(tire_width_mm);
        inner_rim_width_mm >= min && inner_rim_width_mm <= max
    }
}

impl Default for PressureTable {
    fn default() -> Self {
        Self::BUILT_IN
    }
}
