use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

use crate::domains::identity::{AuthPrincipal, JwtService};

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub principal: AuthPrincipal,
}

/// JWT authentication middleware
///
/// Extracts the token from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. An absent or invalid token leaves the
/// request unauthenticated rather than rejecting it; resolvers that need a
/// user enforce that themselves.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(user_id = %user.principal.id, "Authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the JWT token from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        principal: AuthPrincipal::from(claims),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn service() -> JwtService {
        JwtService::new("test_secret", "test_issuer".to_string())
    }

    fn token_for(service: &JwtService, user_id: Uuid) -> String {
        service
            .create_token(
                user_id,
                "jane.doe@example.com".to_string(),
                Some("Jane".to_string()),
                None,
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();
        let token = token_for(&jwt_service, user_id);

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.principal.id.as_uuid(), &user_id);
        assert_eq!(auth_user.principal.email, "jane.doe@example.com");
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();
        let token = token_for(&jwt_service, user_id);

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.principal.id.as_uuid(), &user_id);
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = service();
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = service();
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }
}
