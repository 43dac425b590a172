use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use crate::backend::{query::non_blank, Forward, Pagination, Upstream};
use crate::errors::AppError;
use crate::extract::{JsonBody, OptionalAuth, Path, Query, RequireAuth};
use crate::profile::reorder::{move_section, validate_section_order};
use crate::services::path_segment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SectionOrderRequest {
    pub sections: Vec<String>,
    /// Drag source position; applied together with `to`.
    pub from: Option<usize>,
    pub to: Option<usize>,
}

/// GET /api/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(params): Query<ProfileListQuery>,
) -> Result<Upstream, AppError> {
    let mut query = params.pagination.query_pairs();
    query.push(("search", non_blank(params.search.as_deref())));

    state
        .backend
        .forward(
            Forward::get("/profiles/public")
                .query(query)
                .auth(auth.as_deref()),
        )
        .await
        .map_err(AppError::upstream("Failed to fetch profiles"))
}

/// GET /api/profile/:username
pub async fn handle_get_public_profile(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(username): Path<String>,
) -> Result<Upstream, AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }

    state
        .backend
        .forward(Forward::get(format!("/profiles/{}", path_segment(&username))).auth(auth.as_deref()))
        .await
        .map_err(AppError::upstream("Failed to fetch profile"))
}

/// GET /api/profile
pub async fn handle_get_own_profile(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Upstream, AppError> {
    state
        .backend
        .forward(Forward::get("/profiles/me").auth(Some(auth.as_str())))
        .await
        .map_err(AppError::upstream("Failed to fetch profile"))
}

/// PUT /api/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    JsonBody(body): JsonBody,
) -> Result<Upstream, AppError> {
    state
        .backend
        .forward(Forward::put("/profiles/me").auth(Some(auth.as_str())).json(&body))
        .await
        .map_err(AppError::upstream("Failed to update profile"))
}

/// PUT /api/profile/sections
///
/// Accepts the full section order, optionally with a single drag move
/// (`from` → `to`) to apply before saving.
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    body: JsonBody,
) -> Result<Upstream, AppError> {
    let request: SectionOrderRequest = body.parse()?;
    let mut sections = request.sections;

    validate_section_order(&sections).map_err(|e| AppError::Validation(e.to_string()))?;
    match (request.from, request.to) {
        (Some(from), Some(to)) => move_section(&mut sections, from, to)
            .map_err(|e| AppError::Validation(e.to_string()))?,
        (None, None) => {}
        _ => {
            return Err(AppError::Validation(
                "from and to must be provided together".to_string(),
            ))
        }
    }

    let payload = json!({ "section_order": sections });
    state
        .backend
        .forward(
            Forward::put("/profiles/me/section-order")
                .auth(Some(auth.as_str()))
                .json(&payload),
        )
        .await
        .map_err(AppError::upstream("Failed to update section order"))
}
