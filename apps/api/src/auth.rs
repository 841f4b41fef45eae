//! Caller identity as supplied by the upstream identity provider.
//!
//! The provider authenticates the user and forwards an opaque user id in the
//! `x-user-id` header. No header means an anonymous (guest) caller.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Option<Uuid>);

impl Caller {
    /// The authenticated user id, or `Unauthorized` for guests.
    pub fn require(&self) -> Result<Uuid, AppError> {
        self.0.ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Caller(None));
        };
        let user_id = raw
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;
        Ok(Caller(Some(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<Caller, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Caller::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_missing_header_is_anonymous() {
        assert_eq!(extract(None).await.unwrap(), Caller(None));
    }

    #[tokio::test]
    async fn test_valid_header_is_authenticated() {
        let id = Uuid::new_v4();
        let caller = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(caller.require().unwrap(), id);
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() {
        assert!(matches!(
            extract(Some("not-a-uuid")).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_guest_cannot_require_identity() {
        assert!(Caller(None).require().is_err());
    }
}
