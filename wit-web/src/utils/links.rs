use axum::http::{header, HeaderMap};

/// Build an absolute URL for `path` from the request's `Host` header.
///
/// Honours `X-Forwarded-Proto` and `X-Forwarded-Host`. Falls back to the bare
/// path when no host is known.
pub fn absolute_url(headers: &HeaderMap, path: &str) -> String {
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty());

    let Some(host) = host else {
        return path.to_string();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{}://{}{}", scheme, host, path)
}
