//! JWT bearer authentication
//!
//! [`auth_middleware`] decodes the bearer token, when one is sent, and stores
//! an [`AuthContext`] in the request extensions. Requests without a token stay
//! anonymous; routes that need a user either use the
//! [`Identity`](crate::Identity) extractor or sit behind
//! [`require_authenticated`].

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;
use wit_config::AuthConfig;

use crate::errors::WebError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    /// Subject, the user id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Who is making the current request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthContext {
    subject: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.subject.is_some()
    }

    /// The subject as a user id, when it is one
    pub fn user_id(&self) -> Option<Uuid> {
        self.subject.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }
}

pub struct JwtManager {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for `user_id`, valid for `ttl`
    pub fn generate_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, WebError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| WebError::internal(format!("Failed to generate JWT token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, WebError> {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("JWT verification failed: {}", e);
                WebError::unauthorized("Invalid or expired token")
            })
    }

    fn extract_token(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
    }

    /// Resolve the caller. A missing token is anonymous, a bad one is rejected.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, WebError> {
        if !self.config.enabled {
            return Ok(AuthContext::anonymous());
        }

        match Self::extract_token(headers) {
            Some(token) => {
                let claims = self.verify_token(token)?;
                debug!(subject = %claims.sub, "JWT authentication successful");
                Ok(AuthContext::authenticated(claims.sub))
            }
            None => Ok(AuthContext::anonymous()),
        }
    }
}

pub async fn auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let auth_context = jwt_manager.authenticate(request.headers())?;
    request.extensions_mut().insert(auth_context);
    Ok(next.run(request).await)
}

/// Reject anonymous requests with 401
pub async fn require_authenticated(request: Request, next: Next) -> Result<Response, WebError> {
    let authenticated = request
        .extensions()
        .get::<AuthContext>()
        .is_some_and(AuthContext::is_authenticated);

    if !authenticated {
        return Err(WebError::unauthorized("Authentication required"));
    }
    Ok(next.run(request).await)
}
