//! Transport module.
//!
//! Resolves an endpoint address into a connected stream socket.

mod connection;
mod endpoint;

pub use connection::Connection;
pub use endpoint::{Endpoint, VMADDR_CID_HOST};
