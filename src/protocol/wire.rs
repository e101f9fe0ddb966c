//! Moving a request and its response over a stream.
//!
//! The request is written in full, then exactly one receive is performed.

use std::io::ErrorKind;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;
use tracing::debug;

use super::{Request, Response};
use crate::error::{ClientError, ExchangeErrorKind, Stage};

/// Write the whole request, retrying short writes.
///
/// A write that accepts zero bytes, or any I/O error other than an
/// interruption, stops the loop with `SendIncomplete`.
pub async fn write_request<W>(writer: &mut W, request: &Request) -> Result<(), ClientError>
where
    W: AsyncWriteExt + Unpin,
{
    let data = request.as_bytes();
    let total = data.len();
    let mut sent = 0;

    while sent < total {
        match writer.write(&data[sent..]).await {
            Ok(0) => {
                return Err(send_incomplete(sent, total, "peer accepted no more bytes".to_string()));
            }
            Ok(n) => {
                sent += n;
                debug!(sent, total, "Wrote request bytes");
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(send_incomplete(sent, total, e.to_string())),
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| send_incomplete(sent, total, e.to_string()))?;

    Ok(())
}

/// Perform a single receive of up to `capacity` bytes and classify it.
pub async fn read_response<R>(reader: &mut R, capacity: usize) -> Result<Response, ClientError>
where
    R: AsyncReadExt + Unpin,
{
    let mut buf = vec![0u8; capacity];

    let received = loop {
        match reader.read(&mut buf).await {
            Ok(n) => break n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(ClientError::exchange(ExchangeErrorKind::ReceiveFailed {
                    message: e.to_string(),
                }));
            }
        }
    };
    debug!(received, capacity, "Received response bytes");

    Response::from_received(buf, received, capacity)
}

/// Write the request, giving up after `deadline` if one is set.
pub async fn write_request_with_timeout<W>(
    writer: &mut W,
    request: &Request,
    deadline: Option<Duration>,
) -> Result<(), ClientError>
where
    W: AsyncWriteExt + Unpin,
{
    match deadline {
        Some(d) => timeout(d, write_request(writer, request))
            .await
            .map_err(|_| ClientError::timed_out(Stage::Send, d))?,
        None => write_request(writer, request).await,
    }
}

/// Read the response, giving up after `deadline` if one is set.
pub async fn read_response_with_timeout<R>(
    reader: &mut R,
    capacity: usize,
    deadline: Option<Duration>,
) -> Result<Response, ClientError>
where
    R: AsyncReadExt + Unpin,
{
    match deadline {
        Some(d) => timeout(d, read_response(reader, capacity))
            .await
            .map_err(|_| ClientError::timed_out(Stage::Receive, d))?,
        None => read_response(reader, capacity).await,
    }
}

fn send_incomplete(sent: usize, total: usize, message: String) -> ClientError {
    ClientError::exchange(ExchangeErrorKind::SendIncomplete {
        sent,
        total,
        message,
    })
}
