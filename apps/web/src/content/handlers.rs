use axum::extract::State;
use serde::Deserialize;

use crate::backend::{query::non_blank, Forward, Pagination, Upstream};
use crate::errors::AppError;
use crate::extract::{JsonBody, Query, RequireAuth};
use crate::services::path_segment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentQuery {
    pub letter_id: Option<String>,
    pub delete_all: Option<String>,
}

/// What a delete request targets.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Letter(String),
    All,
}

impl DeleteContentQuery {
    /// A specific letter wins over `deleteAll`.
    pub fn target(&self) -> Result<DeleteTarget, AppError> {
        if let Some(id) = non_blank(self.letter_id.as_deref()) {
            return Ok(DeleteTarget::Letter(id));
        }
        let delete_all = self
            .delete_all
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        if delete_all {
            return Ok(DeleteTarget::All);
        }
        Err(AppError::Validation(
            "Either letterId or deleteAll=true is required".to_string(),
        ))
    }
}

/// POST /api/cover-letter/generate
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    body: JsonBody,
) -> Result<Upstream, AppError> {
    body.require_text("jobDescription")?;

    state
        .backend
        .forward(
            Forward::post("/cover-letters/generate")
                .auth(Some(auth.as_str()))
                .json(&body.0),
        )
        .await
        .map_err(AppError::upstream("Failed to generate cover letter"))
}

/// GET /api/content/history
pub async fn handle_content_history(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(pagination): Query<Pagination>,
) -> Result<Upstream, AppError> {
    state
        .backend
        .forward(
            Forward::get("/cover-letters")
                .query(pagination.query_pairs())
                .auth(Some(auth.as_str())),
        )
        .await
        .map_err(AppError::upstream("Failed to fetch content history"))
}

/// DELETE /api/content/delete?letterId=...|deleteAll=true
pub async fn handle_delete_content(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(params): Query<DeleteContentQuery>,
) -> Result<Upstream, AppError> {
    let call = match params.target()? {
        DeleteTarget::Letter(id) => Forward::delete(format!("/cover-letters/{}", path_segment(&id))),
        DeleteTarget::All => Forward::delete("/cover-letters"),
    };

    state
        .backend
        .forward(call.auth(Some(auth.as_str())))
        .await
        .map_err(AppError::upstream("Failed to delete content"))
}

/// POST /api/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    body: JsonBody,
) -> Result<Upstream, AppError> {
    body.require_text("jobDescription")?;

    state
        .backend
        .forward(
            Forward::post("/job-matching/match")
                .auth(Some(auth.as_str()))
                .json(&body.0),
        )
        .await
        .map_err(AppError::upstream("Failed to match job"))
}
