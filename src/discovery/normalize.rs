use url::Url;

/// Resolve a candidate found on `base_url` into an absolute URL.
///
/// Candidates are treated as site-root relative: no `..` or path-segment
/// resolution is attempted.
pub fn normalize_url(base_url: &str, target_url: &str) -> String {
    if target_url.starts_with("http://") || target_url.starts_with("https://") {
        return target_url.to_string();
    }

    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            tracing::debug!(base = %base_url, error = %e, "unparseable base URL");
            return target_url.to_string();
        }
    };

    if target_url.starts_with("//") {
        return format!("{}:{}", base.scheme(), target_url);
    }

    let origin = origin_of(&base);
    if target_url.starts_with('/') {
        format!("{}{}", origin, target_url)
    } else {
        format!("{}/{}", origin, target_url)
    }
}

/// `scheme://host[:port]` of a parsed URL.
pub fn origin_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}
