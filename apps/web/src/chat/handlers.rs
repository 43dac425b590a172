use axum::extract::State;
use serde::Deserialize;

use crate::backend::{query::non_blank, Forward, Pagination, Upstream};
use crate::errors::AppError;
use crate::extract::{JsonBody, OptionalAuth, Path, Query};
use crate::services::path_segment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// POST /api/chat/:username
pub async fn handle_chat(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(username): Path<String>,
    body: JsonBody,
) -> Result<Upstream, AppError> {
    body.require_text("message")?;

    state
        .backend
        .forward(
            Forward::post(format!("/chat/{}", path_segment(&username)))
                .auth(auth.as_deref())
                .json(&body.0),
        )
        .await
        .map_err(AppError::upstream("Failed to send chat message"))
}

/// GET /api/search?q=...
pub async fn handle_search(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(params): Query<SearchQuery>,
) -> Result<Upstream, AppError> {
    let query = non_blank(params.q.as_deref())
        .ok_or_else(|| AppError::Validation("Search query is required".to_string()))?;

    let mut pairs = vec![("query", Some(query))];
    pairs.extend(params.pagination.query_pairs());

    state
        .backend
        .forward(
            Forward::get("/search/profiles")
                .query(pairs)
                .auth(auth.as_deref()),
        )
        .await
        .map_err(AppError::upstream("Failed to search profiles"))
}
