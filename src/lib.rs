//! Tire Pressure Manager (TPM) Library
//!
//! Bicycle tire pressure estimation, catalog data, and the MCP tools built on them.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod pressure;
pub mod tools;
