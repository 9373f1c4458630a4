//! Warehouse vendor operations console: allocation scoring for the smart
//! routing simulator, plus the vendor and performance views it sits beside.

pub mod config;
pub mod error;
pub mod performance;
pub mod routing;
pub mod telemetry;
pub mod vendors;
