//! TPM Tools module
//!
//! MCP tool implementations for the Tire Pressure Manager.

pub mod calculator;
pub mod cart;
pub mod catalog;
pub mod reports;
pub mod status;
