//! Client module.
//!
//! Runs one request/response exchange against the configured endpoint.

mod responder;

pub use responder::RequestResponder;
