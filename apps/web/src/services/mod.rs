//! Typed wrappers over the backend client.
//! Each call returns a classified `ApiError` so callers can route rate limits
//! to `RateLimitState` and everything else to generic error display.

pub mod chat;
pub mod search;

/// Percent-encodes a single path segment, e.g. a username.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment_encodes_reserved_characters() {
        assert_eq!(path_segment("ada.lovelace"), "ada.lovelace");
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
    }
}
