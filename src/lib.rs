//! vsock-send library
//!
//! Sends a single newline-terminated request to a peer over a VSOCK (or
//! Unix-domain) stream socket and returns the reply from one receive.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;
