pub mod health;
pub mod preferences;


use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::admin::handlers as admin;
use crate::chat::handlers as chat;
use crate::content::handlers as content;
use crate::profile::handlers as profile;
use crate::sitemap::handlers as sitemap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/sitemap.xml", get(sitemap::handle_sitemap))
        .route("/robots.txt", get(sitemap::handle_robots))
        // Profiles
        .route("/api/profiles", get(profile::handle_list_profiles))
        .route(
            "/api/profile",
            get(profile::handle_get_own_profile).put(profile::handle_update_profile),
        )
        .route(
            "/api/profile/sections",
            put(profile::handle_reorder_sections),
        )
        .route(
            "/api/profile/:username",
            get(profile::handle_get_public_profile),
        )
        // Content generation
        .route(
            "/api/cover-letter/generate",
            post(content::handle_generate_cover_letter),
        )
        .route("/api/content/history", get(content::handle_content_history))
        .route("/api/content/delete", delete(content::handle_delete_content))
        .route("/api/job-match", post(content::handle_job_match))
        // Chat & search
        .route("/api/chat/:username", post(chat::handle_chat))
        .route("/api/search", get(chat::handle_search))
        // Admin dashboard
        .route("/api/admin/stats", get(admin::handle_admin_stats))
        .route("/api/admin/actions", get(admin::handle_admin_actions))
        .route("/api/admin/users", get(admin::handle_admin_users))
        .route("/api/admin/dashboard", get(admin::handle_admin_dashboard))
        // UI preferences
        .route(
            "/api/preferences",
            get(preferences::handle_get_preferences),
        )
        .route(
            "/api/preferences/theme",
            put(preferences::handle_set_theme),
        )
        .with_state(state)
}
