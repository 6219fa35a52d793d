//! Rim type model
//!
//! Bead-seating technology of the rim. Affects both the recommended pressure
//! multiplier and the maximum safe pressure.

use serde::{Deserialize, Serialize};

/// Rim type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RimType {
    Tubes,
    Tubular,
    #[default]
    Hooks,
    Hookless,
}

impl RimType {
    pub const ALL: [RimType; 4] = [
        RimType::Tubes,
        RimType::Tubular,
        RimType::Hooks,
        RimType::Hookless,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RimType::Tubes => "tubes",
            RimType::Tubular => "tubular",
            RimType::Hooks => "hooks",
            RimType::Hookless => "hookless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "tubes" | "tube" | "tubed" | "clincher" => Some(RimType::Tubes),
            "tubular" => Some(RimType::Tubular),
            "hooks" | "hooked" | "tubeless-crochet" => Some(RimType::Hooks),
            "hookless" | "straight-side" | "tubeless-straight-side" => Some(RimType::Hookless),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RimType::Tubes => "Tubes (Crochet)",
            RimType::Tubular => "Tubular",
            RimType::Hooks => "Hooks (Tubeless Crochet)",
            RimType::Hookless => "Hookless (Tubeless Straight Side)",
        }
    }
}
