use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::backend::{query::non_blank, Forward, Pagination, Upstream};
use crate::errors::AppError;
use crate::extract::{Query, RequireAuth};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
}

/// GET /api/admin/stats
pub async fn handle_admin_stats(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Upstream, AppError> {
    state
        .backend
        .forward(Forward::get("/admin/stats").auth(Some(auth.as_str())))
        .await
        .map_err(AppError::upstream("Failed to fetch admin stats"))
}

/// GET /api/admin/actions
pub async fn handle_admin_actions(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(pagination): Query<Pagination>,
) -> Result<Upstream, AppError> {
    state
        .backend
        .forward(
            Forward::get("/admin/actions")
                .query(pagination.query_pairs())
                .auth(Some(auth.as_str())),
        )
        .await
        .map_err(AppError::upstream("Failed to fetch admin actions"))
}

/// GET /api/admin/users
pub async fn handle_admin_users(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(params): Query<UserListQuery>,
) -> Result<Upstream, AppError> {
    let mut query = params.pagination.query_pairs();
    query.push(("search", non_blank(params.search.as_deref())));

    state
        .backend
        .forward(
            Forward::get("/admin/users")
                .query(query)
                .auth(Some(auth.as_str())),
        )
        .await
        .map_err(AppError::upstream("Failed to fetch users"))
}

/// GET /api/admin/dashboard
///
/// Fetches stats and recent actions concurrently. The first non-success
/// backend response is relayed as-is.
pub async fn handle_admin_dashboard(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(pagination): Query<Pagination>,
) -> Result<Response, AppError> {
    let stats_call = Forward::get("/admin/stats").auth(Some(auth.as_str()));
    let actions_call = Forward::get("/admin/actions")
        .query(pagination.query_pairs())
        .auth(Some(auth.as_str()));

    let (stats, actions) = tokio::join!(
        state.backend.forward(stats_call),
        state.backend.forward(actions_call),
    );
    let stats = stats.map_err(AppError::upstream("Failed to fetch admin dashboard"))?;
    let actions = actions.map_err(AppError::upstream("Failed to fetch admin dashboard"))?;

    for upstream in [&stats, &actions] {
        if !upstream.is_success() {
            return Ok(upstream.clone().into_response());
        }
    }

    let (Some(stats), Some(actions)) = (stats.json(), actions.json()) else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "admin dashboard backend returned non-JSON body"
        )));
    };

    Ok(Json(json!({ "stats": stats, "actions": actions })).into_response())
}
