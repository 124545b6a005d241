use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::WebError;
use crate::middleware::AuthContext;

/// The authenticated user. Rejects with 401 when the request is anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity(pub Uuid);

impl Identity {
    pub fn user_id(&self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<AuthContext>()
            .ok_or_else(|| WebError::unauthorized("Missing authentication"))?;

        if !context.is_authenticated() {
            return Err(WebError::unauthorized("Missing authentication"));
        }

        context
            .user_id()
            .map(Identity)
            .ok_or_else(|| WebError::unauthorized("Token subject is not a valid user id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(context: Option<AuthContext>) -> Result<Identity, WebError> {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(context) = context {
            request.extensions_mut().insert(context);
        }
        let (mut parts, _) = request.into_parts();
        Identity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_authenticated_user() {
        let user = Uuid::new_v4();
        let identity = extract(Some(AuthContext::authenticated(user.to_string()))).await.unwrap();
        assert_eq!(identity.user_id(), user);
    }

    #[tokio::test]
    async fn test_anonymous_rejected() {
        assert!(matches!(extract(None).await, Err(WebError::Unauthorized { .. })));
        assert!(matches!(
            extract(Some(AuthContext::anonymous())).await,
            Err(WebError::Unauthorized { .. })
        ));
        assert!(matches!(
            extract(Some(AuthContext::authenticated("svc-account"))).await,
            Err(WebError::Unauthorized { .. })
        ));
    }
}
