//! Conditional GET support
//!
//! Responses carry `ETag`, `Last-Modified` and `Cache-Control`. A request
//! whose `If-None-Match` matches the entity tag, or (without `If-None-Match`)
//! whose `If-Modified-Since` is not before the last modification, is answered
//! with `304 Not Modified`. An empty collection has no modification time, so
//! it carries no `Last-Modified` and `If-Modified-Since` never matches it.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SubsecRound, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cache validators of a representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Quoted strong entity tag
    pub etag: String,
    /// Newest modification; `None` for an empty collection
    pub last_modified: Option<DateTime<Utc>>,
}

impl Validators {
    /// Validators of a single entity from its validator string
    pub fn for_entity(validator: &str, updated_at: DateTime<Utc>) -> Self {
        Self::for_entities([(validator, updated_at)])
    }

    /// Validators of a collection. The tag covers every member in order and the
    /// modification time is the newest one.
    pub fn for_entities<'a, I>(entities: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, DateTime<Utc>)>,
    {
        let mut hasher = Sha256::new();
        let mut last_modified: Option<DateTime<Utc>> = None;

        for (validator, updated_at) in entities {
            hasher.update(validator.as_bytes());
            hasher.update(b"\n");
            last_modified = last_modified.max(Some(updated_at));
        }

        Self {
            etag: format!("\"{:x}\"", hasher.finalize()),
            last_modified,
        }
    }

    pub fn last_modified_header(&self) -> Option<String> {
        self.last_modified
            .map(|modified| modified.format(HTTP_DATE_FORMAT).to_string())
    }

    /// Set `ETag`, `Last-Modified` and `Cache-Control` on `headers`
    pub fn apply(&self, headers: &mut HeaderMap, cache_control: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.etag) {
            headers.insert(header::ETAG, value);
        }
        if let Some(Ok(value)) = self.last_modified_header().as_deref().map(HeaderValue::from_str) {
            headers.insert(header::LAST_MODIFIED, value);
        }
        if let Ok(value) = HeaderValue::from_str(cache_control) {
            headers.insert(header::CACHE_CONTROL, value);
        }
    }

    /// Bodyless `304 Not Modified` carrying the validators
    pub fn not_modified(&self, cache_control: &str) -> Response {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        self.apply(response.headers_mut(), cache_control);
        response
    }
}

/// Conditional request headers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalRequest {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<DateTime<Utc>>,
}

impl ConditionalRequest {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let if_none_match = headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // an unparsable date is ignored, as if the header were absent
        let if_modified_since = headers
            .get(header::IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
            .map(|d| d.with_timezone(&Utc));

        Self {
            if_none_match,
            if_modified_since,
        }
    }

    /// Whether the client's copy is still current
    pub fn is_not_modified(&self, validators: &Validators) -> bool {
        if let Some(if_none_match) = &self.if_none_match {
            let matched = if_none_match.split(',').map(str::trim).any(|candidate| {
                candidate == "*" || candidate.trim_start_matches("W/") == validators.etag
            });
            debug!(matched, "Evaluated If-None-Match");
            return matched;
        }

        match (self.if_modified_since, validators.last_modified) {
            (Some(since), Some(modified)) => since >= modified.trunc_subsecs(0),
            _ => false,
        }
    }
}

impl<S> FromRequestParts<S> for ConditionalRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn updated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 12, 30, 0).unwrap() + Duration::milliseconds(250)
    }

    #[test]
    fn test_etag_depends_on_every_member() {
        let a = Validators::for_entities([("a:0", updated()), ("b:0", updated())]);
        let b = Validators::for_entities([("a:0", updated()), ("b:1", updated())]);
        assert_ne!(a.etag, b.etag);
        assert!(a.etag.starts_with('"') && a.etag.ends_with('"'));
    }

    #[test]
    fn test_last_modified_is_newest() {
        let older = updated() - Duration::days(1);
        let v = Validators::for_entities([("a", older), ("b", updated())]);
        assert_eq!(v.last_modified, Some(updated()));
        assert_eq!(v.last_modified_header().as_deref(), Some("Fri, 01 Aug 2025 12:30:00 GMT"));
    }

    #[test]
    fn test_if_none_match() {
        let v = Validators::for_entity("x:1", updated());
        let hit = ConditionalRequest {
            if_none_match: Some(format!("\"other\", W/{}", v.etag)),
            ..Default::default()
        };
        let miss = ConditionalRequest {
            if_none_match: Some("\"other\"".to_string()),
            // ignored when If-None-Match is present
            if_modified_since: Some(updated() + Duration::days(1)),
        };
        assert!(hit.is_not_modified(&v));
        assert!(!miss.is_not_modified(&v));
    }

    #[test]
    fn test_if_modified_since() {
        let v = Validators::for_entity("x:1", updated());
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Fri, 01 Aug 2025 12:30:00 GMT"),
        );
        assert!(ConditionalRequest::from_headers(&headers).is_not_modified(&v));

        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Fri, 01 Aug 2025 12:29:59 GMT"),
        );
        assert!(!ConditionalRequest::from_headers(&headers).is_not_modified(&v));
    }

    #[test]
    fn test_empty_collection_has_no_modification_time() {
        let v = Validators::for_entities(std::iter::empty());
        assert_eq!(v.last_modified, None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Fri, 01 Aug 2025 12:30:00 GMT"),
        );
        assert!(!ConditionalRequest::from_headers(&headers).is_not_modified(&v));

        let mut response_headers = HeaderMap::new();
        v.apply(&mut response_headers, "max-age=300");
        assert!(response_headers.contains_key(header::ETAG));
        assert!(!response_headers.contains_key(header::LAST_MODIFIED));
    }

    #[test]
    fn test_not_modified_response() {
        let v = Validators::for_entity("x:1", updated());
        let response = v.not_modified("max-age=300");
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "max-age=300");
        assert_eq!(response.headers().get(header::ETAG).unwrap(), v.etag.as_str());
    }
}
