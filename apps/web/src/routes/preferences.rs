use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::preferences::Theme;

#[derive(Debug, Deserialize)]
pub struct ThemeUpdate {
    pub theme: Option<String>,
    #[serde(default)]
    pub toggle: bool,
}

fn current_theme(headers: &HeaderMap) -> Theme {
    Theme::from_cookie_header(headers.get(header::COOKIE).and_then(|v| v.to_str().ok()))
}

/// GET /api/preferences
pub async fn handle_get_preferences(headers: HeaderMap) -> impl IntoResponse {
    Json(json!({ "theme": current_theme(&headers) }))
}

/// PUT /api/preferences/theme
pub async fn handle_set_theme(
    headers: HeaderMap,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let update: ThemeUpdate = body.parse()?;

    let theme = match (update.theme.as_deref(), update.toggle) {
        (Some(value), _) => Theme::parse(value).ok_or_else(|| {
            AppError::Validation("theme must be 'light' or 'dark'".to_string())
        })?,
        (None, true) => current_theme(&headers).toggle(),
        (None, false) => {
            return Err(AppError::Validation(
                "Either theme or toggle=true is required".to_string(),
            ))
        }
    };

    Ok((
        [(header::SET_COOKIE, theme.cookie())],
        Json(json!({ "theme": theme })),
    ))
}
