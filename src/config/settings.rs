//! Configuration settings for the client.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ClientError;
use crate::transport::{Endpoint, VMADDR_CID_HOST};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/vsock-send/client.toml";

/// Main configuration structure for the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Transport family ("vsock" or "unix").
    #[serde(default = "default_transport")]
    pub transport: String,
    /// VSOCK context identifier of the peer.
    #[serde(default = "default_cid")]
    pub cid: u32,
    /// VSOCK port of the peer.
    #[serde(default = "default_port")]
    pub port: u32,
    /// Unix socket path, required when transport is "unix".
    pub path: Option<PathBuf>,
}

/// Request line formatting.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// Follow every token, including the last, with a space.
    #[serde(default = "default_trailing_separator")]
    pub trailing_separator: bool,
}

/// Limits configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Size of the single receive buffer in bytes.
    #[serde(default = "default_response_buffer_size")]
    pub response_buffer_size: usize,
    /// Connect deadline in seconds. Unset means wait on the transport.
    pub connect_timeout_seconds: Option<u64>,
    /// Send and receive deadline in seconds. Unset means block.
    pub io_timeout_seconds: Option<u64>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Literal printed before the response bytes.
    #[serde(default = "default_label")]
    pub label: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_transport() -> String {
    "vsock".to_string()
}

fn default_cid() -> u32 {
    VMADDR_CID_HOST
}

fn default_port() -> u32 {
    9999
}

fn default_trailing_separator() -> bool {
    true
}

fn default_response_buffer_size() -> usize {
    4096
}

fn default_label() -> String {
    "Value: ".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            cid: default_cid(),
            port: default_port(),
            path: None,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            trailing_separator: default_trailing_separator(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            response_buffer_size: default_response_buffer_size(),
            connect_timeout_seconds: None,
            io_timeout_seconds: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LimitsConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_seconds.map(Duration::from_secs)
    }

    pub fn io_timeout(&self) -> Option<Duration> {
        self.io_timeout_seconds.map(Duration::from_secs)
    }
}

impl EndpointConfig {
    /// Resolve the configured transport into an endpoint address.
    pub fn endpoint(&self) -> Result<Endpoint, ClientError> {
        match self.transport.to_lowercase().as_str() {
            "vsock" => Ok(Endpoint::Vsock {
                cid: self.cid,
                port: self.port,
            }),
            "unix" => match &self.path {
                Some(path) => Ok(Endpoint::Unix { path: path.clone() }),
                None => Err(ClientError::Config {
                    message: "Unix transport requires 'endpoint.path'".to_string(),
                }),
            },
            other => Err(ClientError::Config {
                message: format!(
                    "Invalid transport '{}'. Valid transports: {:?}",
                    other,
                    ["vsock", "unix"]
                ),
            }),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ClientError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings = Self::from_toml(&content).map_err(|e| match e {
            ClientError::Config { message } => ClientError::Config {
                message: format!("{} (in '{}')", message, path.display()),
            },
            other => other,
        })?;

        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ClientError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ClientError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), ClientError> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ClientError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate log format
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(ClientError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if self.limits.response_buffer_size == 0 {
            return Err(ClientError::Config {
                message: "response_buffer_size must be greater than zero".to_string(),
            });
        }

        if self.limits.connect_timeout_seconds == Some(0) || self.limits.io_timeout_seconds == Some(0) {
            return Err(ClientError::Config {
                message: "Timeouts must be at least one second; omit them to disable".to_string(),
            });
        }

        self.endpoint.endpoint()?;

        Ok(())
    }
}
