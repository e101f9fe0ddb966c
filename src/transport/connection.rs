//! Connected stream for a single exchange.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::UnixStream;
use tokio_vsock::{VsockAddr, VsockStream};
use tracing::debug;

use super::Endpoint;

/// A connected stream socket.
///
/// The socket is closed when the value is dropped.
pub enum Connection {
    Vsock(VsockStream),
    Unix(UnixStream),
}

impl Connection {
    /// Open a stream socket to the endpoint.
    pub async fn connect(endpoint: &Endpoint) -> io::Result<Self> {
        let conn = match endpoint {
            Endpoint::Vsock { cid, port } => {
                Connection::Vsock(VsockStream::connect(VsockAddr::new(*cid, *port)).await?)
            }
            Endpoint::Unix { path } => Connection::Unix(UnixStream::connect(path).await?),
        };
        debug!(endpoint = %endpoint, "Connected");
        Ok(conn)
    }
}

impl AsyncRead for Connection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Vsock(s) => Pin::new(s).poll_read(cx, buf),
            Connection::Unix(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Connection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Connection::Vsock(s) => Pin::new(s).poll_write(cx, buf),
            Connection::Unix(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Vsock(s) => Pin::new(s).poll_flush(cx),
            Connection::Unix(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Vsock(s) => Pin::new(s).poll_shutdown(cx),
            Connection::Unix(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixListener;

    #[tokio::test]
    async fn test_unix_connection_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("peer.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let peer = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4];
            stream.read_exact(&mut buf).await.unwrap();
            stream.write_all(&buf).await.unwrap();
        });

        let mut conn = Connection::connect(&Endpoint::Unix { path }).await.unwrap();
        conn.write_all(b"ping").await.unwrap();
        let mut buf = [0u8; 4];
        conn.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        peer.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_missing_socket() {
        let dir = tempfile::TempDir::new().unwrap();
        let endpoint = Endpoint::Unix {
            path: dir.path().join("nobody.sock"),
        };
        assert!(Connection::connect(&endpoint).await.is_err());
    }
}
