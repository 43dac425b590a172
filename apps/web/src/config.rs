use anyhow::{Context, Result};

const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8000";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Gateway configuration loaded from environment variables.
/// Every variable has a local-development fallback.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API, without the `/api/v1` suffix.
    pub backend_api_url: String,
    /// Public origin of the frontend. Sent as `Origin` on outbound calls
    /// and used to build sitemap and robots URLs.
    pub site_url: String,
    pub port: u16,
    pub backend_timeout_secs: u64,
    pub sitemap_revalidate_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_api_url: trim_base_url(&env_or("BACKEND_API_URL", DEFAULT_BACKEND_API_URL)),
            site_url: trim_base_url(&env_or("SITE_URL", DEFAULT_SITE_URL)),
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            backend_timeout_secs: env_or("BACKEND_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            sitemap_revalidate_secs: env_or("SITEMAP_REVALIDATE_SECS", "3600")
                .parse::<u64>()
                .context("SITEMAP_REVALIDATE_SECS must be a whole number of seconds")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Configuration pointing at the given backend, with defaults elsewhere.
    pub fn for_backend(backend_api_url: &str) -> Self {
        Config {
            backend_api_url: trim_base_url(backend_api_url),
            site_url: DEFAULT_SITE_URL.to_string(),
            port: 3000,
            backend_timeout_secs: 30,
            sitemap_revalidate_secs: 3600,
            rust_log: "info".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| {
            tracing::debug!("{key} not set, using default: {default}");
            default.to_string()
        })
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
