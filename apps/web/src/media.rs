/// Served by the frontend when a profile has no picture.
pub const DEFAULT_AVATAR_PATH: &str = "/images/default-avatar.png";

/// Resolves a stored image reference to a URL a browser can load.
///
/// Absolute, `data:` and `blob:` URLs pass through. Paths are served by the
/// backend (uploads live there), so they are joined onto `backend_base`.
pub fn resolve_image_url(raw: Option<&str>, backend_base: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_AVATAR_PATH.to_string();
    };

    let lower = raw.to_ascii_lowercase();
    if ["http://", "https://", "data:", "blob:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return raw.to_string();
    }
    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{rest}");
    }

    let base = backend_base.trim_end_matches('/');
    format!("{}/{}", base, raw.trim_start_matches('/'))
}
