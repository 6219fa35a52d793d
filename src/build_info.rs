//! Build information module
//!
//! Compile-time build number, timestamp and profile, plus the startup banner.

use serde::Serialize;

use crate::config::Config;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("TPM_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("TPM_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile the binary was built with
pub const BUILD_PROFILE: &str = match option_env!("TPM_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            build_profile: BUILD_PROFILE,
            description: DESCRIPTION,
        }
    }

    /// e.g. "1.0.0 (build 42, release)"
    pub fn version_label(&self) -> String {
        format!("{} (build {}, {})", self.version, self.build_number, self.build_profile)
    }

    /// Banner lines describing this build and the active configuration
    pub fn banner_lines(&self, config: &Config) -> Vec<String> {
        vec![
            "Tire Pressure Manager (TPM)".to_string(),
            format!("Version: {}", self.version_label()),
            format!("Compiled: {}", self.build_timestamp),
            format!("Pressure table: {}", config.table_source),
            format!("Reports: {}", config.report_dir.display()),
        ]
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner(config: &Config) {
    let rule = "=".repeat(47);
    eprintln!("{}", rule);
    for line in BuildInfo::current().banner_lines(config) {
        eprintln!("  {}", line);
    }
    eprintln!("{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("12a"), None);
    }

    #[test]
    fn test_build_info_current() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "tpm");
        assert_eq!(info.version, VERSION);
        assert!(info.version_label().starts_with(VERSION));
        assert!(info.version_label().contains(info.build_profile));
    }

    #[test]
    fn test_banner_lines_show_config() {
        let config = Config {
            report_dir: std::path::PathBuf::from("/srv/tpm/reports"),
            table: Default::default(),
            table_source: crate::config::TableSource::File("/etc/tpm/table.json".into()),
        };
        let lines = BuildInfo::current().banner_lines(&config);
        assert_eq!(lines[0], "Tire Pressure Manager (TPM)");
        assert!(lines.contains(&"Pressure table: /etc/tpm/table.json".to_string()));
        assert!(lines.contains(&"Reports: /srv/tpm/reports".to_string()));
    }
}
