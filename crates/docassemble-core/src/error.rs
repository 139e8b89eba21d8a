//! Error types for the Docassemble client.
//!
//! Every failure reported by the remote server is an [`DocassembleError::Api`]
//! carrying the HTTP status code and the raw response body; the remaining
//! variants cover transport, configuration and argument problems.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Docassemble client.
#[derive(Debug, Error)]
pub enum DocassembleError {
    // Remote API errors
    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        /// Raw response body as returned by the server
        response_data: Option<String>,
    },

    #[error("Feature '{feature}' not supported: {message}")]
    UnsupportedFeature { feature: String, message: String },

    // Network errors
    #[error("Request failed: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Tool invocation errors
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Result type alias for Docassemble operations.
pub type Result<T> = std::result::Result<T, DocassembleError>;

impl From<std::io::Error> for DocassembleError {
    fn from(err: std::io::Error) -> Self {
        DocassembleError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for DocassembleError {
    fn from(err: serde_json::Error) -> Self {
        DocassembleError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl DocassembleError {
    /// Map a transport error; `timeout` is the limit the request ran under.
    pub fn from_reqwest(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            DocassembleError::Timeout(timeout)
        } else {
            DocassembleError::Network {
                message: err.to_string(),
                cause: std::error::Error::source(&err).map(|s| s.to_string()),
            }
        }
    }

    /// Build an API error from a non-success status and its body.
    pub fn api(status_code: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let mut message = format!("API request failed with status {}", status_code);
        if !body.is_empty() {
            message.push_str(": ");
            message.push_str(&body);
        }
        DocassembleError::Api {
            message,
            status_code: Some(status_code),
            response_data: Some(body),
        }
    }

    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        DocassembleError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// HTTP status code of an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DocassembleError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Raw response body of an API error.
    pub fn response_data(&self) -> Option<&str> {
        match self {
            DocassembleError::Api { response_data, .. } => response_data.as_deref(),
            _ => None,
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// - -32601: Unknown tool
    /// - -32602: Invalid params
    /// - -32603: Internal error
    /// - -32000: Remote API / network error
    /// - -32001: Feature unsupported by the connected server
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            DocassembleError::UnknownTool(_) => -32601,
            DocassembleError::InvalidParams { .. } => -32602,
            DocassembleError::Api { .. }
            | DocassembleError::Network { .. }
            | DocassembleError::Timeout(_) => -32000,
            DocassembleError::UnsupportedFeature { .. } => -32001,
            _ => -32603,
        }
    }

    /// Gateway-style API errors that the enhanced request path retries once.
    ///
    /// Transport failures are not retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            DocassembleError::Api {
                status_code: Some(code),
                ..
            } => crate::config::NetworkConfig::RETRY_STATUS_CODES.contains(code),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_preserves_status_and_body() {
        let err = DocassembleError::api(403, "Access denied.");
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.response_data(), Some("Access denied."));
        assert_eq!(
            err.to_string(),
            "API request failed with status 403: Access denied."
        );
    }

    #[test]
    fn test_api_error_empty_body() {
        let err = DocassembleError::api(500, "");
        assert_eq!(err.to_string(), "API request failed with status 500");
        assert_eq!(err.response_data(), Some(""));
    }

    #[test]
    fn test_rpc_error_codes() {
        assert_eq!(DocassembleError::UnknownTool("x".into()).to_rpc_error_code(), -32601);
        assert_eq!(
            DocassembleError::InvalidParams {
                message: "missing i".into()
            }
            .to_rpc_error_code(),
            -32602
        );
        assert_eq!(DocassembleError::api(404, "").to_rpc_error_code(), -32000);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(DocassembleError::api(503, "").is_retryable());
        assert!(!DocassembleError::api(400, "").is_retryable());
        assert!(!DocassembleError::Timeout(std::time::Duration::from_secs(5)).is_retryable());
        assert!(!DocassembleError::Config {
            message: "x".into()
        }
        .is_retryable());
    }
}
