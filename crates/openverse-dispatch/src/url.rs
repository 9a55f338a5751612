//! Absolute URL construction.

/// Normalize a configured base URL: default to `http://` when no scheme is
/// present and strip any trailing slash.
#[must_use]
pub fn normalize_base_url(base_url: &str) -> String {
    let base = base_url.trim();
    let with_scheme = if base.starts_with("http://") || base.starts_with("https://") {
        base.to_owned()
    } else {
        format!("http://{base}")
    };
    with_scheme.trim_end_matches('/').to_owned()
}

/// Build the absolute URL `{scheme}://{host}:{port}{path}`.
#[must_use]
pub fn build_url(base_url: &str, port: u16, path: &str) -> String {
    let base = normalize_base_url(base_url);
    if path.starts_with('/') {
        format!("{base}:{port}{path}")
    } else {
        format!("{base}:{port}/{path}")
    }
}
