//! Ride style model
//!
//! The terrain/discipline a rider selects. Rougher disciplines run lower
//! pressure, so each style maps to a multiplier in the pressure table.

use serde::{Deserialize, Serialize};

/// Ride style enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RideStyle {
    #[default]
    Road,
    Gravel,
    MtbXc,
    MtbTrail,
    MtbEnduro,
    MtbDownhill,
}

impl RideStyle {
    /// All styles, ordered from smoothest to roughest terrain
    pub const ALL: [RideStyle; 6] = [
        RideStyle::Road,
        RideStyle::Gravel,
        RideStyle::MtbXc,
        RideStyle::MtbTrail,
        RideStyle::MtbEnduro,
        RideStyle::MtbDownhill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RideStyle::Road => "road",
            RideStyle::Gravel => "gravel",
            RideStyle::MtbXc => "mtb-xc",
            RideStyle::MtbTrail => "mtb-trail",
            RideStyle::MtbEnduro => "mtb-enduro",
            RideStyle::MtbDownhill => "mtb-downhill",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "road" => Some(RideStyle::Road),
            "gravel" => Some(RideStyle::Gravel),
            "mtb-xc" | "xc" | "cross-country" => Some(RideStyle::MtbXc),
            "mtb-trail" | "trail" => Some(RideStyle::MtbTrail),
            "mtb-enduro" | "enduro" => Some(RideStyle::MtbEnduro),
            "mtb-downhill" | "downhill" | "dh" => Some(RideStyle::MtbDownhill),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RideStyle::Road => "Road",
            RideStyle::Gravel => "Gravel",
            RideStyle::MtbXc => "MTB Cross Country",
            RideStyle::MtbTrail => "MTB Trail",
            RideStyle::MtbEnduro => "MTB Enduro",
            RideStyle::MtbDownhill => "MTB Downhill",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrip() {
        for style in RideStyle::ALL {
            assert_eq!(RideStyle::from_str(style.as_str()), Some(style));
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(RideStyle::from_str("MTB_Trail"), Some(RideStyle::MtbTrail));
        assert_eq!(RideStyle::from_str("downhill"), Some(RideStyle::MtbDownhill));
        assert_eq!(RideStyle::from_str("track"), None);
    }

    #[test]
    fn test_serde_matches_as_str() {
        for style in RideStyle::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.as_str()));
        }
    }
}
