use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Cloudflare API operations.
///
/// Every failure of a single call surfaces as one of these variants; the
/// client never retries. All variants are serializable so a presentation
/// layer can forward them as structured data.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClientError {
    /// A transport-level failure (connection refused, DNS, TLS, body read).
    #[error("Network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The stored email/API key pair was rejected.
    ///
    /// Raised for HTTP 401/403 and for Cloudflare's authentication error codes.
    #[error("Invalid credentials{}", fmt_suffix(.raw_message.as_deref()))]
    InvalidCredentials {
        /// HTTP status of the rejected response.
        status: u16,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The server answered with a non-2xx status that is not an auth failure.
    #[error("HTTP {status}{}", fmt_suffix(.raw_message.as_deref()))]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// First Cloudflare error code in the body, if any.
        code: Option<i64>,
        /// First Cloudflare error message in the body, or the raw body.
        raw_message: Option<String>,
    },

    /// A 2xx response whose envelope reported `success: false`.
    #[error("API error {code}: {message}")]
    Api {
        /// Cloudflare error code (0 when the envelope carried none).
        code: i64,
        /// Cloudflare error message.
        message: String,
    },

    /// The response body did not match the expected envelope shape.
    #[error("Parse error: {detail}")]
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// The client configuration cannot produce a valid request
    /// (bad base URL, header value with control characters, ...).
    #[error("Invalid configuration: {detail}")]
    InvalidConfig {
        /// What is wrong.
        detail: String,
    },
}

fn fmt_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ClientError {
    /// 是否为预期行为（用户输入、凭证错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidCredentials { .. } | Self::Api { .. } => true,
            Self::HttpStatus { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Whether the failure happened before a response was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
