//! Classified errors for typed backend calls.
//!
//! The UI layer only needs to know the kind of failure; the rate-limit kind
//! additionally carries whatever structured quota data the backend sent.

use serde_json::Value;
use thiserror::Error;

use crate::rate_limit::{RateLimitDetails, RateLimitType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message}")]
    RateLimited {
        message: String,
        /// Legacy `Retry-After` signal in seconds.
        retry_after: Option<u64>,
        details: Option<RateLimitDetails>,
    },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Backend returned status {status}")]
    Backend { status: u16, body: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid response body: {message}")]
    Decode { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    RateLimit,
    Unauthorized,
    NotFound,
    Validation,
    Backend,
    Network,
    Decode,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::RateLimited { .. } => ApiErrorKind::RateLimit,
            ApiError::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            ApiError::NotFound { .. } => ApiErrorKind::NotFound,
            ApiError::Validation { .. } => ApiErrorKind::Validation,
            ApiError::Backend { .. } => ApiErrorKind::Backend,
            ApiError::Network { .. } => ApiErrorKind::Network,
            ApiError::Decode { .. } => ApiErrorKind::Decode,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        self.kind() == ApiErrorKind::RateLimit
    }

    /// Classifies a non-success backend response.
    ///
    /// `retry_after` is the parsed `Retry-After` header, if any.
    pub fn from_response(status: u16, retry_after: Option<u64>, body: &[u8]) -> ApiError {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();
        let message = parsed
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| default_message(status).to_string());

        match status {
            429 => {
                let details = parsed
                    .as_ref()
                    .and_then(|v| v.get("detail"))
                    .and_then(structured_details);
                let retry_after = retry_after.or_else(|| {
                    parsed
                        .as_ref()
                        .and_then(|v| v.get("retry_after"))
                        .and_then(Value::as_u64)
                });
                ApiError::RateLimited {
                    message,
                    retry_after,
                    details,
                }
            }
            401 | 403 => ApiError::Unauthorized { message },
            404 => ApiError::NotFound { message },
            400 | 422 => ApiError::Validation { message },
            _ => ApiError::Backend {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network {
            message: e.to_string(),
        }
    }
}

/// Parses a `Retry-After` header value given as delta-seconds.
/// HTTP-date values are not interpreted.
pub fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn extract_message(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Object(obj)) => {
            if let Some(Value::String(s)) = obj.get("message") {
                return Some(s.clone());
            }
        }
        // Validation errors arrive as a list of `{loc, msg}` objects.
        Some(Value::Array(items)) => {
            if let Some(msg) = items.first().and_then(|i| i.get("msg")).and_then(Value::as_str) {
                return Some(msg.to_string());
            }
        }
        _ => {}
    }

    ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Reads the structured quota payload. Returns `None` when it is missing or
/// names an unknown quota, which sends the caller down the legacy path.
fn structured_details(detail: &Value) -> Option<RateLimitDetails> {
    let obj = detail.as_object()?;
    let reset_in_seconds = obj.get("reset_in_seconds")?.as_u64()?;
    let is_authenticated = obj
        .get("is_authenticated")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let rate_limit_type = match obj.get("rate_limit_type") {
        None | Some(Value::Null) => RateLimitType::default(),
        Some(v) => serde_json::from_value::<RateLimitType>(v.clone()).ok()?,
    };

    Some(RateLimitDetails {
        reset_in_seconds,
        is_authenticated,
        rate_limit_type,
    })
}

fn default_message(status: u16) -> &'static str {
    match status {
        429 => "Rate limit exceeded. Please try again later.",
        401 => "Authentication required",
        403 => "Access denied",
        404 => "Not found",
        400 | 422 => "Invalid request",
        _ => "Request failed",
    }
}
