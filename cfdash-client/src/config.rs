//! Client configuration

use std::time::Duration;

/// Cloudflare v4 API base endpoint.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings used to build a [`CloudflareClient`](crate::CloudflareClient).
///
/// Credentials are passed next to it, so one config serves every email/key
/// pair the user enters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// TCP connect timeout. `None` leaves reqwest's default.
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout. `None` leaves reqwest's default.
    pub request_timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: CF_API_BASE.to_string(),
            connect_timeout: Some(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            user_agent: concat!("cfdash/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at another API root (proxy, local fake server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect: Option<Duration>, request: Option<Duration>) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    /// Join an API path (starting with `/`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
