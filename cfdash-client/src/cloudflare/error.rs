//! Cloudflare error mapping

use crate::error::ClientError;
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::{CloudflareErrorBody, CloudflareMessage};

/// Cloudflare error codes meaning the email/key pair was rejected.
/// Reference: <https://api.cloudflare.com/#getting-started-responses>
///
/// 6003: Invalid request headers
/// 6103: Invalid format for X-Auth-Key header
/// 6111: Invalid format for Authorization header
/// 9103: Unknown X-Auth-Key or X-Auth-Email
/// 9106: Missing X-Auth-Key, X-Auth-Email or Authorization headers
/// 9109: Unauthorized to access requested resource
/// 10000: Authentication error
const AUTH_ERROR_CODES: [i64; 7] = [6003, 6103, 6111, 9103, 9106, 9109, 10000];

fn is_auth_code(code: i64) -> bool {
    AUTH_ERROR_CODES.contains(&code)
}

/// Map a non-2xx response to an error.
///
/// 401/403 and auth error codes become `InvalidCredentials`, everything
/// else `HttpStatus`. The body is decoded leniently: a non-JSON body (proxy
/// error page) is kept, truncated, as the message.
pub(crate) fn map_status_error(status: u16, body: &str) -> ClientError {
    let first = serde_json::from_str::<CloudflareErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().next());

    let code = first.as_ref().map(|e| e.code);
    let raw_message = first
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| truncate_for_log(body.trim())));

    if matches!(status, 401 | 403) || code.is_some_and(is_auth_code) {
        ClientError::InvalidCredentials {
            status,
            raw_message,
        }
    } else {
        ClientError::HttpStatus {
            status,
            code,
            raw_message,
        }
    }
}

/// Map a 2xx envelope with `success: false` to an error.
pub(crate) fn map_envelope_error(status: u16, errors: &[CloudflareMessage]) -> ClientError {
    let Some(first) = errors.first() else {
        return ClientError::Api {
            code: 0,
            message: "Unknown error".to_string(),
        };
    };

    if is_auth_code(first.code) {
        ClientError::InvalidCredentials {
            status,
            raw_message: Some(first.message.clone()),
        }
    } else {
        ClientError::Api {
            code: first.code,
            message: first.message.clone(),
        }
    }
}
