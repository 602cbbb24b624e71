//! # obcli Library
//!
//! This library exposes the obcli modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod commands;
pub mod error;
pub mod store;

pub use error::Error;

// Re-export obcli_core for convenience
pub use obcli_core;
