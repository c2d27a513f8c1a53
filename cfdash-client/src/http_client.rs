//! Generic HTTP client tools
//!
//! Sending a prepared request, logging it, and reading the body are the same
//! for every endpoint; endpoint code only builds the `RequestBuilder` and
//! decides how to interpret the body.
//!
//! Every call is attempted exactly once. There is no retry or backoff layer.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `method_name` - request method name, for logs
    /// * `url` - full URL, for logs
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - a response was received, whatever its status
    /// * `Err(ClientError::Timeout)` - the request timed out
    /// * `Err(ClientError::InvalidConfig)` - the request could not be built
    /// * `Err(ClientError::Network)` - any other transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    detail: e.to_string(),
                }
            } else if e.is_builder() {
                ClientError::InvalidConfig {
                    detail: e.to_string(),
                }
            } else {
                ClientError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| ClientError::Network {
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ClientError::Parse)` - the body does not have the expected shape
    pub fn parse_json<T>(response_text: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            ClientError::Parse {
                detail: e.to_string(),
            }
        })
    }
}
