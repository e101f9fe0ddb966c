//! Single request/response exchange.

use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::{ClientError, ClientResult, ExchangeErrorKind, Stage};
use crate::protocol::{
    read_response_with_timeout, write_request_with_timeout, Request, RequestFormat, Response,
    DEFAULT_RESPONSE_BUFFER_SIZE,
};
use crate::transport::{Connection, Endpoint};

/// Sends one request line to an endpoint and waits for one reply.
///
/// Each call opens its own connection and closes it before returning,
/// whatever the outcome.
#[derive(Debug, Clone)]
pub struct RequestResponder {
    endpoint: Endpoint,
    format: RequestFormat,
    capacity: usize,
    connect_timeout: Option<Duration>,
    io_timeout: Option<Duration>,
}

impl RequestResponder {
    /// Create a responder with the default buffer size, request format and no deadlines.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            format: RequestFormat::default(),
            capacity: DEFAULT_RESPONSE_BUFFER_SIZE,
            connect_timeout: None,
            io_timeout: None,
        }
    }

    /// Create a responder from loaded settings.
    pub fn from_settings(settings: &Settings) -> ClientResult<Self> {
        let format = if settings.request.trailing_separator {
            RequestFormat::TrailingSeparator
        } else {
            RequestFormat::Joined
        };

        Ok(Self::new(settings.endpoint.endpoint()?)
            .with_format(format)
            .with_capacity(settings.limits.response_buffer_size)
            .with_connect_timeout(settings.limits.connect_timeout())
            .with_io_timeout(settings.limits.io_timeout()))
    }

    pub fn with_format(mut self, format: RequestFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_connect_timeout(mut self, deadline: Option<Duration>) -> Self {
        self.connect_timeout = deadline;
        self
    }

    pub fn with_io_timeout(mut self, deadline: Option<Duration>) -> Self {
        self.io_timeout = deadline;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send the tokens as one request line and return the reply.
    ///
    /// No socket is opened when `tokens` is empty.
    pub async fn send_and_receive<S: AsRef<str>>(&self, tokens: &[S]) -> ClientResult<Response> {
        let request = Request::from_tokens(tokens, self.format)?;
        let exchange_id = Uuid::new_v4();
        let start_time = Instant::now();

        debug!(
            exchange_id = %exchange_id,
            endpoint = %self.endpoint,
            bytes = request.len(),
            "Sending request"
        );

        let result = self.exchange(&request).await;

        match &result {
            Ok(response) => info!(
                exchange_id = %exchange_id,
                endpoint = %self.endpoint,
                bytes = response.len(),
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Exchange complete"
            ),
            Err(e) => warn!(
                exchange_id = %exchange_id,
                endpoint = %self.endpoint,
                error = %e,
                "Exchange failed"
            ),
        }

        result
    }

    async fn exchange(&self, request: &Request) -> ClientResult<Response> {
        let mut conn = self.connect().await?;

        write_request_with_timeout(&mut conn, request, self.io_timeout).await?;
        read_response_with_timeout(&mut conn, self.capacity, self.io_timeout).await
    }

    async fn connect(&self) -> ClientResult<Connection> {
        let attempt = Connection::connect(&self.endpoint);
        let result = match self.connect_timeout {
            Some(d) => timeout(d, attempt)
                .await
                .map_err(|_| ClientError::timed_out(Stage::Connect, d))?,
            None => attempt.await,
        };

        result.map_err(|e| {
            ClientError::exchange(ExchangeErrorKind::ConnectFailed {
                endpoint: self.endpoint.to_string(),
                message: e.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = Settings::from_toml(
            r#"
            [endpoint]
            port = 1234

            [request]
            trailing_separator = false

            [limits]
            response_buffer_size = 512
            connect_timeout_seconds = 2
            "#,
        )
        .unwrap();

        let responder = RequestResponder::from_settings(&settings).unwrap();
        assert_eq!(responder.endpoint(), &Endpoint::host(1234));
        assert_eq!(responder.format, RequestFormat::Joined);
        assert_eq!(responder.capacity, 512);
        assert_eq!(responder.connect_timeout, Some(Duration::from_secs(2)));
        assert_eq!(responder.io_timeout, None);
    }

    #[tokio::test]
    async fn test_empty_tokens_fail_before_connecting() {
        // Nothing listens here; a usage error proves connect was never tried.
        let responder = RequestResponder::new(Endpoint::Unix {
            path: "/nonexistent/peer.sock".into(),
        });
        let tokens: Vec<String> = Vec::new();

        let err = responder.send_and_receive(&tokens).await.unwrap_err();
        assert!(matches!(err, ClientError::Usage { .. }));
    }
}
