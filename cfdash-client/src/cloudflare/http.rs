//! Cloudflare HTTP 请求方法

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::http_client::HttpUtils;

use super::CloudflareClient;
use super::error::{map_envelope_error, map_status_error};
use super::types::{CloudflareDeleteResponse, CloudflareResponse, RecordBody};

const HEADER_AUTH_EMAIL: &str = "X-Auth-Email";
const HEADER_AUTH_KEY: &str = "X-Auth-Key";

impl CloudflareClient {
    /// Request with the two auth headers and the JSON content type.
    fn authed(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(HEADER_AUTH_EMAIL, &self.credentials.email)
            .header(HEADER_AUTH_KEY, &self.credentials.api_key)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and return the status and body of a 2xx response.
    ///
    /// Non-2xx statuses are turned into errors here.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&RecordBody<'_>>,
    ) -> Result<(u16, String)> {
        let url = self.config.url(path);
        let mut request = self.authed(method.clone(), &url);

        if let Some(body) = body {
            log::debug!(
                "Request Body: {}",
                serde_json::to_string(body).unwrap_or_default()
            );
            request = request.json(body);
        }

        let (status, text) = HttpUtils::execute_request(request, method.as_str(), &url).await?;

        if !(200..300).contains(&status) {
            let err = map_status_error(status, &text);
            if err.is_expected() {
                log::warn!("{method} {path} failed: {err}");
            } else {
                log::error!("{method} {path} failed: {err}");
            }
            return Err(err);
        }

        Ok((status, text))
    }

    /// Send a request and unwrap the `result` of the envelope.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&RecordBody<'_>>,
    ) -> Result<T> {
        let (status, text) = self.send(method, path, body).await?;
        let envelope: CloudflareResponse<T> = HttpUtils::parse_json(&text)?;

        if !envelope.success {
            let err = map_envelope_error(status, &envelope.errors);
            if err.is_expected() {
                log::warn!("API 错误: {err}");
            } else {
                log::error!("API 错误: {err}");
            }
            return Err(err);
        }

        envelope.result.ok_or_else(|| {
            log::error!("响应中缺少 result 字段: {path}");
            ClientError::Parse {
                detail: "missing result field".to_string(),
            }
        })
    }

    /// Send a DELETE and return the envelope's `success` flag.
    pub(crate) async fn call_delete(&self, path: &str) -> Result<bool> {
        let (_, text) = self.send(Method::DELETE, path, None).await?;
        let envelope: CloudflareDeleteResponse = HttpUtils::parse_json(&text)?;

        if !envelope.success {
            log::warn!(
                "DELETE {path} reported success=false: {:?}",
                envelope.errors.first().map(|e| &e.message)
            );
        }

        Ok(envelope.success)
    }
}
