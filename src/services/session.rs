use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Authenticated identity-provider session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub access_token: String,
}

/// Read-only capability resolving a request to its session.
/// Injected into [`crate::AppState`]; handlers never read session state directly.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session>;
}

/// Reads `Authorization: Bearer <token>` plus an optional `X-User-Id`
#[derive(Debug, Clone, Default)]
pub struct BearerSessionResolver;

pub const USER_ID_HEADER: &str = "x-user-id";

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[async_trait]
impl SessionResolver for BearerSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        let access_token = bearer_token(headers)?;
        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Some(Session {
            user_id,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_bearer_token_resolved() {
        let mut h = headers("Bearer ya29.token");
        h.insert(USER_ID_HEADER, HeaderValue::from_static("user-1"));

        let session = BearerSessionResolver.resolve(&h).await.unwrap();
        assert_eq!(session.access_token, "ya29.token");
        assert_eq!(session.user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_scheme_is_case_insensitive() {
        let session = BearerSessionResolver.resolve(&headers("bearer abc")).await;
        assert_eq!(session.unwrap().access_token, "abc");
    }

    #[tokio::test]
    async fn test_missing_or_wrong_scheme() {
        assert!(BearerSessionResolver.resolve(&HeaderMap::new()).await.is_none());
        assert!(BearerSessionResolver.resolve(&headers("Basic dXNlcjpwYXNz")).await.is_none());
        assert!(BearerSessionResolver.resolve(&headers("Bearer   ")).await.is_none());
    }
}
