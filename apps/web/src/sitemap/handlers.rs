use axum::{extract::State, http::header, response::IntoResponse};
use chrono::Utc;

use crate::services::search::SearchService;
use crate::sitemap::{build_sitemap, render_xml, robots_txt, PROFILE_FETCH_LIMIT};
use crate::state::AppState;

/// GET /sitemap.xml
pub async fn handle_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let backend = &state.backend;
    let profiles = state
        .profile_cache
        .get_or_fetch(|| async move {
            SearchService::new(backend)
                .public_profiles(PROFILE_FETCH_LIMIT, 0)
                .await
        })
        .await;

    let entries = build_sitemap(
        &state.config.site_url,
        backend.base_url(),
        profiles.as_deref().map(Vec::as_slice),
        Utc::now(),
    );

    (
        [
            (header::CONTENT_TYPE, "application/xml".to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.config.sitemap_revalidate_secs),
            ),
        ],
        render_xml(&entries),
    )
}

/// GET /robots.txt
pub async fn handle_robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.config.site_url),
    )
}
