use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::sitemap::ProfileCache;

/// Shared gateway state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: Config,
    /// Public profile list backing `sitemap.xml`, refreshed on expiry.
    pub profile_cache: Arc<ProfileCache>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let backend = BackendClient::new(&config)?;
        let profile_cache = Arc::new(ProfileCache::new(std::time::Duration::from_secs(
            config.sitemap_revalidate_secs,
        )));
        Ok(Self {
            backend,
            config,
            profile_cache,
        })
    }
}
