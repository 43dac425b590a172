use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::{ApiError, BackendClient, Pagination};

/// A profile as listed publicly by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PublicProfile {
    /// Update time, falling back to creation time.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.created_at.as_deref().and_then(parse_timestamp))
    }
}

/// Accepts RFC 3339 as well as the naive ISO timestamps (read as UTC) the
/// backend emits for older rows.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileListing {
    Bare(Vec<PublicProfile>),
    Wrapped { profiles: Vec<PublicProfile> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub total: Option<u64>,
}

pub struct SearchService<'a> {
    backend: &'a BackendClient,
}

impl<'a> SearchService<'a> {
    pub fn new(backend: &'a BackendClient) -> Self {
        Self { backend }
    }

    /// GET /search/profiles?query=...&limit=...&offset=...
    pub async fn search_profiles(
        &self,
        query: &str,
        pagination: &Pagination,
        auth: Option<&str>,
    ) -> Result<SearchResults, ApiError> {
        let mut params = vec![("query", Some(query.trim().to_string()))];
        params.extend(pagination.query_pairs());
        self.backend
            .get_json("/search/profiles", &params, auth)
            .await
    }

    /// GET /profiles/public?limit=...&offset=...
    pub async fn public_profiles(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PublicProfile>, ApiError> {
        let params = [
            ("limit", Some(limit.to_string())),
            ("offset", Some(offset.to_string())),
        ];
        let listing: ProfileListing = self
            .backend
            .get_json("/profiles/public", &params, None)
            .await?;

        Ok(match listing {
            ProfileListing::Bare(profiles) | ProfileListing::Wrapped { profiles } => profiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ApiErrorKind;
    use crate::config::Config;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn backend(server: &MockServer) -> BackendClient {
        BackendClient::new(&Config::for_backend(&server.base_url())).unwrap()
    }

    #[test]
    fn test_last_modified_prefers_updated_at() {
        let profile = PublicProfile {
            username: "ada".into(),
            full_name: None,
            profile_picture: None,
            updated_at: Some("2024-05-01T10:00:00Z".into()),
            created_at: Some("2023-01-01T00:00:00Z".into()),
        };
        assert_eq!(
            profile.last_modified().unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_last_modified_falls_back_to_naive_created_at() {
        let profile = PublicProfile {
            username: "ada".into(),
            full_name: None,
            profile_picture: None,
            updated_at: Some("garbage".into()),
            created_at: Some("2023-01-02T03:04:05.123456".into()),
        };
        let dt = profile.last_modified().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2023-01-02");
    }

    #[tokio::test]
    async fn test_public_profiles_accepts_wrapped_listing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/profiles/public")
                    .query_param("limit", "50")
                    .query_param("offset", "0");
                then.status(200).json_body(json!({
                    "profiles": [{ "username": "ada", "extra": 1 }, { "username": "grace" }]
                }));
            })
            .await;

        let profiles = SearchService::new(&backend(&server))
            .public_profiles(50, 0)
            .await
            .unwrap();
        let names: Vec<_> = profiles.iter().map(|p| p.username.as_str()).collect();
        assert_eq!(names, ["ada", "grace"]);
    }

    #[tokio::test]
    async fn test_search_profiles_builds_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/search/profiles")
                    .query_param("query", "rust engineer")
                    .query_param("limit", "10")
                    .query_param("offset", "20");
                then.status(200).json_body(json!({
                    "results": [{ "username": "ada", "headline": "Engineer", "score": 0.9 }],
                    "total": 1
                }));
            })
            .await;

        let results = SearchService::new(&backend(&server))
            .search_profiles(" rust engineer ", &Pagination::new(10, 20), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(results.total, Some(1));
        assert_eq!(results.results[0].headline.as_deref(), Some("Engineer"));
    }

    #[tokio::test]
    async fn test_search_rate_limit_is_classified() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/search/profiles");
                then.status(429).json_body(json!({
                    "detail": {
                        "message": "Search limit reached",
                        "reset_in_seconds": 300,
                        "is_authenticated": false,
                        "rate_limit_type": "job_matching"
                    }
                }));
            })
            .await;

        let err = SearchService::new(&backend(&server))
            .search_profiles("rust", &Pagination::default(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::RateLimit);
    }
}
