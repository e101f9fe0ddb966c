//! Wire protocol module.
//!
//! Defines the request line, the response buffer and the exchange of one
//! for the other over a stream socket.
//!
//! ## Wire Format
//!
//! A request is ASCII text terminated by a single newline:
//! ```text
//! token1 token2 ... tokenN \n
//! ```
//! The response is whatever a single receive returns, up to the buffer size.

mod request;
mod response;
mod wire;

pub use request::{Request, RequestFormat};
pub use response::{Response, DEFAULT_RESPONSE_BUFFER_SIZE};
pub use wire::{
    read_response, read_response_with_timeout, write_request, write_request_with_timeout,
};
