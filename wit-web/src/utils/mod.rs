mod links;

pub use links::absolute_url;

/// Media type of JSON:API documents
pub const JSONAPI_CONTENT_TYPE: &str = "application/vnd.api+json";
