//! Configuration module for vsock-send.
//!
//! Handles loading and validating client configuration from TOML files.

mod settings;

pub use settings::*;
