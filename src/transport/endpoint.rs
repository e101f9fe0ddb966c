//! Remote endpoint addresses.

use std::fmt;
use std::path::PathBuf;

/// Context identifier of the host as seen from a guest.
pub const VMADDR_CID_HOST: u32 = 2;

/// Address of the peer a request is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// VSOCK stream socket addressed by context identifier and port.
    Vsock { cid: u32, port: u32 },
    /// Unix-domain stream socket, used for local peers and mock listeners.
    Unix { path: PathBuf },
}

impl Endpoint {
    /// The host endpoint on the given VSOCK port.
    pub fn host(port: u32) -> Self {
        Endpoint::Vsock {
            cid: VMADDR_CID_HOST,
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Vsock { cid, port } => write!(f, "vsock://{}:{}", cid, port),
            Endpoint::Unix { path } => write!(f, "unix://{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::host(9999).to_string(), "vsock://2:9999");
        let unix = Endpoint::Unix {
            path: PathBuf::from("/run/peer.sock"),
        };
        assert_eq!(unix.to_string(), "unix:///run/peer.sock");
    }
}
