//! TPM Status Tool
//!
//! Runtime status of the TPM service, plus usage notes for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Pressure calculator instructions for AI assistants
pub const PRESSURE_INSTRUCTIONS: &str = r#"
# TPM Tire Pressure Instructions

This guide explains how to recommend bicycle tire pressure using the Tire Pressure Manager (TPM) tools.

## Overview

A recommendation needs a complete setup:
1. **Rider mass** and **bike mass** (same unit, `kg` or `lbs`)
2. **Ride style** - road, gravel, mtb-xc, mtb-trail, mtb-enduro, mtb-downhill
3. **Tire widths** in mm, front and rear
4. **Inner rim width** in mm (one value, shared by both wheels)
5. **Rim type** - tubes, tubular, hooks, hookless
6. **Pressure unit** for the answer - `psi` or `bar`

Call `calculator_defaults` to see the starting values and the usual slider ranges.

---

## How the Estimate Works

- Total mass is split 42% front / 58% rear
- Wider tires need less pressure per kg of load
- Rougher styles run softer (road highest, downhill lowest)
- Tubeless setups run softer than tubes
- The result is clamped to the rim rating: **72 psi** for hookless, **120 psi** otherwise

Values are rounded to one decimal in the requested unit.

## Warnings

Only one warning is returned:

| Code | Meaning |
|------|---------|
| `rim_incompatible` | A tire is outside 50-80% of its width for this inner rim width |
| `exceeds_rim_rating` | A wheel was clamped to the rim rating (takes precedence) |

When you see `exceeds_rim_rating`, suggest a wider tire or a lighter setup rather than exceeding the rating.
Use `check_rim_compatibility` to see which wheel falls outside the band.

---

## Quick Reference

| Task | Tool |
|------|------|
| Recommend pressure | `calculate_tire_pressure` |
| Check tire vs rim width | `check_rim_compatibility` |
| Convert psi/bar | `convert_pressure` |
| Ride style options | `list_ride_styles` |
| Rim type options | `list_rim_types` |
| Tire model catalog | `list_tires` |
| Rim width chart | `rim_width_chart` |
| Form defaults and ranges | `calculator_defaults` |
| Cart totals | `calculate_order_summary` |
| PDF pressure sweep | `generate_pressure_report` |
| Service status | `tpm_status` |

## Notes

- The tire model is informational; only width affects the estimate
- Recommendations are a starting point; riders adjust for preference and terrain
- Reports are written under the configured report directory unless an absolute path is given
"#;

/// Runtime status of the TPM service
#[derive(Debug, Clone, Serialize)]
pub struct TpmStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub version: &'static str,

    /// Configuration
    pub report_dir: String,
    pub pressure_table: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub estimates_served: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    report_dir: PathBuf,
    table_source: String,
    estimates_served: AtomicU64,
}

impl StatusTracker {
    pub fn new(report_dir: PathBuf, table_source: String) -> Self {
        Self {
            start_time: Instant::now(),
            report_dir,
            table_source,
            estimates_served: AtomicU64::new(0),
        }
    }

    /// Count one pressure estimate
    pub fn record_estimate(&self) {
        self.record_estimates(1);
    }

    pub fn record_estimates(&self, count: u64) {
        self.estimates_served.fetch_add(count, Ordering::Relaxed);
    }

    pub fn get_status(&self) -> TpmStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TpmStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            build_profile: build_info.build_profile,
            version: build_info.version,
            report_dir: self.report_dir.display().to_string(),
            pressure_table: self.table_source.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            estimates_served: self.estimates_served.load(Ordering::Relaxed),
        }
    }
}
