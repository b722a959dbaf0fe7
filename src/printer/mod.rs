//! # Printer Module
//!
//! Printer hardware profiles.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware profiles

pub mod config;

pub use config::PrinterConfig;
