//! `sitemap.xml` and `robots.txt` generation.
//!
//! The sitemap merges a fixed list of public pages with one entry per public
//! profile. When the profile list cannot be fetched only the fixed pages are
//! emitted; generation itself never fails.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::backend::ApiError;
use crate::media::resolve_image_url;
use crate::services::path_segment;
use crate::services::search::PublicProfile;

pub mod handlers;

/// Upper bound on profiles requested for a single sitemap.
pub const PROFILE_FETCH_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    pub images: Vec<String>,
}

const STATIC_PAGES: &[(&str, ChangeFrequency, f32)] = &[
    ("", ChangeFrequency::Daily, 1.0),
    ("/search", ChangeFrequency::Daily, 0.9),
    ("/cover-letter", ChangeFrequency::Weekly, 0.8),
    ("/chat", ChangeFrequency::Weekly, 0.7),
    ("/about", ChangeFrequency::Monthly, 0.5),
    ("/privacy", ChangeFrequency::Yearly, 0.3),
    ("/terms", ChangeFrequency::Yearly, 0.3),
];

pub fn static_entries(site_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    STATIC_PAGES
        .iter()
        .map(|(path, change_frequency, priority)| SitemapEntry {
            url: format!("{site_url}{path}"),
            last_modified: now,
            change_frequency: *change_frequency,
            priority: *priority,
            images: Vec::new(),
        })
        .collect()
}

pub fn profile_entry(
    site_url: &str,
    backend_base: &str,
    profile: &PublicProfile,
    now: DateTime<Utc>,
) -> SitemapEntry {
    let images = profile
        .profile_picture
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| vec![resolve_image_url(Some(p), backend_base)])
        .unwrap_or_default();

    SitemapEntry {
        url: format!("{site_url}/profile/{}", path_segment(&profile.username)),
        last_modified: profile.last_modified().unwrap_or(now),
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.8,
        images,
    }
}

/// Static entries followed by one entry per profile. `None` means the
/// profile fetch failed. Rows with a blank username have no profile page
/// and are skipped with a warning.
pub fn build_sitemap(
    site_url: &str,
    backend_base: &str,
    profiles: Option<&[PublicProfile]>,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mut entries = static_entries(site_url, now);
    for profile in profiles.unwrap_or_default() {
        if profile.username.trim().is_empty() {
            warn!(
                "Skipping public profile without a username (full_name: {:?})",
                profile.full_name
            );
            continue;
        }
        entries.push(profile_entry(site_url, backend_base, profile, now));
    }
    entries
}

pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" ",
        "xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\">\n",
    ));

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        for image in &entry.images {
            xml.push_str(&format!(
                "    <image:image>\n      <image:loc>{}</image:loc>\n    </image:image>\n",
                escape_xml(image)
            ));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

pub fn robots_txt(site_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin\n\
         Disallow: /settings\n\
         \n\
         Sitemap: {site_url}/sitemap.xml\n"
    )
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// The public profile list, kept for `ttl` after a successful fetch.
/// Failed fetches are not cached. At most one refresh runs at a time;
/// concurrent callers wait for it and reuse its result.
pub struct ProfileCache {
    ttl: Duration,
    inner: RwLock<Option<(Instant, Arc<Vec<PublicProfile>>)>>,
    refresh: Mutex<()>,
}

impl ProfileCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    async fn fresh(&self) -> Option<Arc<Vec<PublicProfile>>> {
        self.inner
            .read()
            .await
            .as_ref()
            .filter(|(fetched_at, _)| fetched_at.elapsed() < self.ttl)
            .map(|(_, profiles)| profiles.clone())
    }

    /// Returns the cached list while fresh, otherwise calls `fetch`.
    /// Returns `None` when the fetch fails.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Option<Arc<Vec<PublicProfile>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<PublicProfile>, ApiError>>,
    {
        if let Some(profiles) = self.fresh().await {
            debug!("Serving {} cached profiles", profiles.len());
            return Some(profiles);
        }

        let _refresh = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(profiles) = self.fresh().await {
            return Some(profiles);
        }

        match fetch().await {
            Ok(profiles) => {
                let profiles = Arc::new(profiles);
                *self.inner.write().await = Some((Instant::now(), profiles.clone()));
                Some(profiles)
            }
            Err(e) => {
                warn!("Failed to fetch public profiles for sitemap: {e}");
                None
            }
        }
    }
}
