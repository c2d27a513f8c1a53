//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

use crate::types::RecordForm;

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareMessage>,
}

/// Delete confirmation. Only `success` is relied upon.
#[derive(Debug, Deserialize)]
pub struct CloudflareDeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<CloudflareMessage>,
}

/// Error-only view of a body, used for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct CloudflareErrorBody {
    #[serde(default)]
    pub errors: Vec<CloudflareMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Request body for create and update.
#[derive(Debug, Serialize)]
pub struct RecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
}

impl<'a> From<&'a RecordForm> for RecordBody<'a> {
    fn from(form: &'a RecordForm) -> Self {
        Self {
            record_type: form.record_type.as_str(),
            name: &form.name,
            content: &form.content,
            ttl: form.ttl,
        }
    }
}
