use serde::Deserialize;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Builds `?k=v&...` from the given pairs, skipping absent values.
/// Returns an empty string when nothing is present.
pub fn build_query_string(params: &[(&str, Option<String>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|v| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(v))
            })
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// Inbound `limit` / `offset` query parameters.
///
/// Values are kept as raw strings so that malformed input falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Pagination {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Pagination {
            limit: Some(limit.to_string()),
            offset: Some(offset.to_string()),
        }
    }

    /// Limit defaulted to 20 and clamped to `1..=100`.
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> u32 {
        self.offset
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("limit", Some(self.limit().to_string())),
            ("offset", Some(self.offset().to_string())),
        ]
    }
}

/// Returns the trimmed value when it is not blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
