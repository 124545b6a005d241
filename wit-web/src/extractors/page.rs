use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::errors::WebError;

pub const DEFAULT_PAGE_LIMIT: u64 = 100;

const PAGING_ERROR: &str = "Could not parse paging";

/// Offset pagination taken from `page[offset]` and `page[limit]`, or the
/// legacy `page=offset,limit` form.
///
/// A missing or non-positive limit means [`DEFAULT_PAGE_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, WebError> {
        let mut offset = params.get("page[offset]").map(String::as_str);
        let mut limit = params.get("page[limit]").map(String::as_str);

        if offset.is_none() && limit.is_none() {
            if let Some(legacy) = params.get("page") {
                let (o, l) = legacy
                    .split_once(',')
                    .ok_or_else(|| WebError::bad_parameter(PAGING_ERROR))?;
                offset = Some(o);
                limit = Some(l);
            }
        }

        let offset = match offset {
            Some(raw) => {
                let value = parse_number(raw)?;
                u64::try_from(value).map_err(|_| WebError::bad_parameter(PAGING_ERROR))?
            }
            None => 0,
        };

        let limit = match limit {
            Some(raw) => match parse_number(raw)? {
                n if n <= 0 => DEFAULT_PAGE_LIMIT,
                n => n.unsigned_abs(),
            },
            None => DEFAULT_PAGE_LIMIT,
        };

        Ok(Self { offset, limit })
    }

    pub fn to_query(&self) -> String {
        format!("page[offset]={}&page[limit]={}", self.offset, self.limit)
    }

    pub fn first(&self) -> Page {
        Page {
            offset: 0,
            limit: self.limit,
        }
    }

    pub fn next(&self) -> Page {
        Page {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

fn parse_number(raw: &str) -> Result<i64, WebError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| WebError::bad_parameter(PAGING_ERROR))
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|_| WebError::bad_parameter(PAGING_ERROR))?;
        Page::from_query(&params)
    }
}
