//! Shared HTTP response helpers for relay attempts.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`FetchError::Api`]) and unwrapping of the JSON
//! envelope some relays wrap the page in.

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde_json::Value;

use crate::error::FetchError;

/// Map a relay response to its body-bearing success or a [`FetchError`].
///
/// 429 becomes [`FetchError::RateLimited`] carrying the relay's
/// `Retry-After` hint (60 s when absent). The chain does not wait on it;
/// the hint is recorded with the failed attempt. Any other non-success
/// status becomes [`FetchError::Api`] with the body as message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    Err(FetchError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}

/// `Retry-After` in whole seconds. HTTP-date values fall back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

/// Extract the page markup from a relay body.
///
/// Relays either pass the page through untouched or wrap it as
/// `{"contents": "<html>..."}`. A bare JSON string is unwrapped too.
/// Anything else is treated as raw HTML.
///
/// # Errors
///
/// Returns [`FetchError::EmptyBody`] when no markup remains.
pub fn unwrap_envelope(body: &str) -> Result<String, FetchError> {
    let document = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("contents") {
            Some(Value::String(contents)) => contents.clone(),
            _ => body.to_string(),
        },
        Ok(Value::String(contents)) => contents,
        _ => body.to_string(),
    };

    if document.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }
    Ok(document)
}
