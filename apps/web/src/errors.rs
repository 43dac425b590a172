use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Backend responses with a non-success status are not errors here: they are
/// relayed verbatim by [`crate::backend::Upstream`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authorization header required")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a transport failure with the generic message shown to the caller.
    pub fn upstream(context: &'static str) -> impl FnOnce(reqwest::Error) -> AppError {
        move |source| AppError::Upstream { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authorization header required".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream { context, source } => {
                tracing::error!("{context}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
