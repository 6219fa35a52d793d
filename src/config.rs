//! Runtime configuration
//!
//! Resolved once at startup from environment variables:
//! - `TPM_REPORT_DIR`: where generated PDF reports are written
//! - `TPM_PRESSURE_TABLE`: optional JSON file replacing the built-in pressure table

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pressure::PressureTable;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read pressure table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pressure table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid pressure table {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Where the active pressure table came from
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    BuiltIn,
    File(PathBuf),
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::BuiltIn => write!(f, "built-in"),
            TableSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub report_dir: PathBuf,
    pub table: PressureTable,
    pub table_source: TableSource,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let report_dir = get_report_dir();

        let (table, table_source) = match std::env::var_os("TPM_PRESSURE_TABLE") {
            Some(path) => {
                let path = PathBuf::from(path);
                let table = load_pressure_table(&path)?;
                tracing::info!(path = %path.display(), "Loaded pressure table");
                (table, TableSource::File(path))
            }
            None => (PressureTable::default(), TableSource::BuiltIn),
        };

        Ok(Self {
            report_dir,
            table,
            table_source,
        })
    }
}

/// Project root, found by walking up out of target/{debug,release}
pub fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path
}

/// Get the report directory from environment or use default
pub fn get_report_dir() -> PathBuf {
    std::env::var("TPM_REPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| project_root().join("reports"))
}

/// Read and check a pressure table JSON file
pub fn load_pressure_table(path: &Path) -> Result<PressureTable, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let table: PressureTable =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    check_table(&table).map_err(|reason| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(table)
}

fn check_table(table: &PressureTable) -> Result<(), String> {
    let s = &table.style_multipliers;
    let r = &table.rim_multipliers;
    let values = [
        ("axle_split.front", table.axle_split.front),
        ("axle_split.rear", table.axle_split.rear),
        ("width_factor.base", table.width_factor.base),
        ("width_factor.slope", table.width_factor.slope),
        ("width_factor.floor", table.width_factor.floor),
        ("style_multipliers.road", s.road),
        ("style_multipliers.gravel", s.gravel),
        ("style_multipliers.mtb-xc", s.mtb_xc),
        ("style_multipliers.mtb-trail", s.mtb_trail),
        ("style_multipliers.mtb-enduro", s.mtb_enduro),
        ("style_multipliers.mtb-downhill", s.mtb_downhill),
        ("rim_multipliers.tubes", r.tubes),
        ("rim_multipliers.tubular", r.tubular),
        ("rim_multipliers.hooks", r.hooks),
        ("rim_multipliers.hookless", r.hookless),
        ("rim_band.min_ratio", table.rim_band.min_ratio),
        ("rim_band.max_ratio", table.rim_band.max_ratio),
        ("caps.hookless_psi", table.caps.hookless_psi),
        ("caps.standard_psi", table.caps.standard_psi),
    ];

    for (name, value) in values {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("{} must be a positive number, got {}", name, value));
        }
    }

    if (table.axle_split.front + table.axle_split.rear - 1.0).abs() > 1e-6 {
        return Err("axle_split.front + axle_split.rear must equal 1".to_string());
    }
    if table.rim_band.min_ratio > table.rim_band.max_ratio {
        return Err("rim_band.min_ratio must not exceed rim_band.max_ratio".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tpm_config_{}_{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_pressure_table_roundtrip() {
        let mut table = PressureTable::default();
        table.caps.hookless_psi = 70.0;
        let path = temp_file("roundtrip", &serde_json::to_string_pretty(&table).unwrap());

        let loaded = load_pressure_table(&path).unwrap();
        assert_eq!(loaded.caps.hookless_psi, 70.0);
        assert_eq!(loaded.style_multipliers, PressureTable::BUILT_IN.style_multipliers);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_pressure_table_missing_file() {
        let err = load_pressure_table(Path::new("/nonexistent/tpm/table.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_pressure_table_bad_json() {
        let path = temp_file("bad_json", "{ not json");
        let err = load_pressure_table(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_pressure_table_rejects_bad_split() {
        let mut table = PressureTable::default();
        table.axle_split.front = 0.5;
        let path = temp_file("bad_split", &serde_json::to_string(&table).unwrap());
        let err = load_pressure_table(&path).unwrap_err();
        assert!(err.to_string().contains("axle_split"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_check_table_rejects_zero_multiplier() {
        let mut table = PressureTable::default();
        table.rim_multipliers.hooks = 0.0;
        let err = check_table(&table).unwrap_err();
        assert!(err.contains("rim_multipliers.hooks"));
    }

    #[test]
    fn test_table_source_display() {
        assert_eq!(TableSource::BuiltIn.to_string(), "built-in");
        assert_eq!(TableSource::File(PathBuf::from("/etc/tpm.json")).to_string(), "/etc/tpm.json");
    }
}
