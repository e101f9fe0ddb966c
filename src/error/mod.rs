//! Error types for vsock-send.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
