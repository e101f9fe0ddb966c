//! Response buffer and its classification.

use crate::error::{ClientError, ExchangeErrorKind};

/// Receive buffer size used when none is configured.
pub const DEFAULT_RESPONSE_BUFFER_SIZE: usize = 4096;

/// Bytes returned by the peer in a single receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    bytes: Vec<u8>,
}

impl Response {
    /// Classify the outcome of one receive into a buffer of `capacity` bytes.
    ///
    /// A buffer that was not completely filled counts as a complete reply.
    /// A filled buffer is treated as an oversized reply and rejected.
    pub fn from_received(mut buf: Vec<u8>, received: usize, capacity: usize) -> Result<Self, ClientError> {
        if received >= capacity {
            return Err(ClientError::exchange(ExchangeErrorKind::ResponseTooLarge { capacity }));
        }

        buf.truncate(received);
        Ok(Self { bytes: buf })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
