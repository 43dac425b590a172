//! Rate-limit notification state.
//!
//! Drives the "limit reached" modal. The state opens on any rate-limit
//! classified [`ApiError`] and closes only when the user dismisses it.

use serde::{Deserialize, Serialize};

use crate::backend::ApiError;

/// Reset time used when a legacy rate-limit error carries no usable signal.
pub const FALLBACK_RESET_SECONDS: u64 = 60;

/// Which quota was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitType {
    #[default]
    JobMatching,
    Chat,
    ContentGeneration,
}

/// Structured quota data sent by the backend alongside a 429.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDetails {
    pub reset_in_seconds: u64,
    pub is_authenticated: bool,
    pub rate_limit_type: RateLimitType,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitState {
    pub is_open: bool,
    pub message: String,
    pub reset_in_seconds: u64,
    pub is_authenticated: bool,
    pub rate_limit_type: RateLimitType,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an error from any API call.
    ///
    /// Returns `true` when the error was a rate limit and the modal is now
    /// open. Other kinds leave the state untouched.
    pub fn handle_error(&mut self, error: &ApiError) -> bool {
        let ApiError::RateLimited {
            message,
            retry_after,
            details,
        } = error
        else {
            return false;
        };

        let details = details.clone().unwrap_or_else(|| RateLimitDetails {
            reset_in_seconds: retry_after
                .or_else(|| seconds_in_message(message))
                .unwrap_or(FALLBACK_RESET_SECONDS),
            is_authenticated: false,
            rate_limit_type: RateLimitType::JobMatching,
        });

        // Overwrites in place when already open.
        *self = RateLimitState {
            is_open: true,
            message: message.clone(),
            reset_in_seconds: details.reset_in_seconds,
            is_authenticated: details.is_authenticated,
            rate_limit_type: details.rate_limit_type,
        };
        true
    }

    pub fn dismiss(&mut self) {
        self.is_open = false;
    }

    /// Human-readable time until the quota resets, e.g. "1 hour 5 minutes".
    pub fn reset_label(&self) -> String {
        format_duration(self.reset_in_seconds)
    }
}

/// Finds `N` in phrases like "retry after N seconds".
fn seconds_in_message(message: &str) -> Option<u64> {
    let words: Vec<&str> = message.split_whitespace().collect();
    words.windows(2).find_map(|pair| {
        let unit = pair[1].to_ascii_lowercase();
        if unit.starts_with("sec") {
            pair[0]
                .trim_matches(|c: char| !c.is_ascii_digit())
                .parse::<u64>()
                .ok()
        } else {
            None
        }
    })
}

fn format_duration(seconds: u64) -> String {
    fn unit(n: u64, name: &str) -> String {
        if n == 1 {
            format!("1 {name}")
        } else {
            format!("{n} {name}s")
        }
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    match (hours, minutes) {
        (0, 0) => unit(secs, "second"),
        (0, m) => unit(m, "minute"),
        (h, 0) => unit(h, "hour"),
        (h, m) => format!("{} {}", unit(h, "hour"), unit(m, "minute")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(reset: u64, authed: bool, kind: RateLimitType) -> ApiError {
        ApiError::RateLimited {
            message: "Limit reached".into(),
            retry_after: None,
            details: Some(RateLimitDetails {
                reset_in_seconds: reset,
                is_authenticated: authed,
                rate_limit_type: kind,
            }),
        }
    }

    #[test]
    fn test_starts_closed() {
        let state = RateLimitState::new();
        assert!(!state.is_open);
        assert_eq!(state.reset_in_seconds, 0);
        assert_eq!(state.rate_limit_type, RateLimitType::JobMatching);
    }

    #[test]
    fn test_structured_error_opens_modal() {
        let mut state = RateLimitState::new();
        assert!(state.handle_error(&structured(120, true, RateLimitType::Chat)));
        assert!(state.is_open);
        assert_eq!(state.reset_in_seconds, 120);
        assert!(state.is_authenticated);
        assert_eq!(state.rate_limit_type, RateLimitType::Chat);
        assert_eq!(state.message, "Limit reached");
    }

    #[test]
    fn test_legacy_error_uses_retry_after() {
        let mut state = RateLimitState::new();
        let err = ApiError::RateLimited {
            message: "Too many requests".into(),
            retry_after: Some(600),
            details: None,
        };
        assert!(state.handle_error(&err));
        assert!(state.is_open);
        assert_eq!(state.reset_in_seconds, 600);
        assert!(!state.is_authenticated);
        assert_eq!(state.rate_limit_type, RateLimitType::JobMatching);
    }

    #[test]
    fn test_legacy_error_reads_seconds_from_message() {
        let mut state = RateLimitState::new();
        let err = ApiError::RateLimited {
            message: "Please retry after 45 seconds.".into(),
            retry_after: None,
            details: None,
        };
        state.handle_error(&err);
        assert_eq!(state.reset_in_seconds, 45);
    }

    #[test]
    fn test_legacy_error_without_signal_uses_fallback() {
        let mut state = RateLimitState::new();
        let err = ApiError::RateLimited {
            message: "Slow down".into(),
            retry_after: None,
            details: None,
        };
        state.handle_error(&err);
        assert!(state.is_open);
        assert_eq!(state.reset_in_seconds, FALLBACK_RESET_SECONDS);
    }

    #[test]
    fn test_other_errors_are_ignored() {
        let mut state = RateLimitState::new();
        let err = ApiError::NotFound {
            message: "Profile not found".into(),
        };
        assert!(!state.handle_error(&err));
        assert_eq!(state, RateLimitState::new());
    }

    #[test]
    fn test_second_error_overwrites_while_open() {
        let mut state = RateLimitState::new();
        state.handle_error(&structured(120, false, RateLimitType::Chat));
        state.handle_error(&structured(30, true, RateLimitType::ContentGeneration));
        assert!(state.is_open);
        assert_eq!(state.reset_in_seconds, 30);
        assert!(state.is_authenticated);
        assert_eq!(state.rate_limit_type, RateLimitType::ContentGeneration);
    }

    #[test]
    fn test_dismiss_keeps_fields_and_is_idempotent() {
        let mut state = RateLimitState::new();
        state.handle_error(&structured(120, true, RateLimitType::Chat));

        state.dismiss();
        let once = state.clone();
        assert!(!once.is_open);
        assert_eq!(once.reset_in_seconds, 120);
        assert_eq!(once.rate_limit_type, RateLimitType::Chat);
        assert!(once.is_authenticated);

        state.dismiss();
        assert_eq!(state, once);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut state = RateLimitState::new();
        state.handle_error(&structured(10, false, RateLimitType::ContentGeneration));
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["isOpen"], true);
        assert_eq!(value["resetInSeconds"], 10);
        assert_eq!(value["rateLimitType"], "content_generation");
    }

    #[test]
    fn test_reset_label() {
        let mut state = RateLimitState::new();
        for (secs, label) in [
            (1, "1 second"),
            (45, "45 seconds"),
            (120, "2 minutes"),
            (3600, "1 hour"),
            (3900, "1 hour 5 minutes"),
        ] {
            state.reset_in_seconds = secs;
            assert_eq!(state.reset_label(), label);
        }
    }
}
