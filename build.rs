//! Build script for TPM
//!
//! Bumps `build_number.txt` on each recompilation and embeds the build number,
//! timestamp and cargo profile for the status tool and startup banner.

use std::fs;
use std::path::Path;

fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    // Only rerun when src/ files change (not on every cargo build)
    println!("cargo:rerun-if-changed=src");

    let build_number_path = Path::new("build_number.txt");
    let new_build = read_build_number(build_number_path) + 1;

    fs::write(build_number_path, new_build.to_string())
        .expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=TPM_BUILD_NUMBER={}", new_build);
    println!("cargo:rustc-env=TPM_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=TPM_BUILD_PROFILE={}", profile);
    println!("cargo:warning=TPM Build #{} ({}) at {}", new_build, profile, timestamp);
}
