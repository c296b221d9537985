//! Middleware de autenticación JWT
//!
//! El middleware decodifica el token cuando existe y deja la identidad en las
//! extensions de la request. Cada handler declara qué necesita con un
//! extractor: `AuthenticatedUser`, `AdminUser` o `CustomerUser`.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    models::account::Role,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token, JwtClaims},
    },
};

/// Identidad de la request, tomada de los claims del token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub account_id: i32,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl TryFrom<JwtClaims> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(claims: JwtClaims) -> Result<Self, Self::Error> {
        let account_id = claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(Self {
            account_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Middleware opcional: un token inválido o ausente deja la request anónima
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_token_from_header)
        .and_then(|token| match verify_token(token, &state.jwt) {
            Ok(claims) => {
                debug!("🔑 Token válido (jti={})", claims.jti);
                AuthenticatedUser::try_from(claims).ok()
            }
            Err(e) => {
                debug!("🔑 Token descartado: {}", e);
                None
            }
        });

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Usuario con rol Admin
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

/// Usuario con rol User (cliente)
#[derive(Debug, Clone)]
pub struct CustomerUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for CustomerUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != Role::User {
            return Err(AppError::Forbidden("User role required".to_string()));
        }
        Ok(CustomerUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let (mut parts, _) = HttpRequest::builder().uri("/").body(()).unwrap().into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            account_id: 3,
            email: "dewi@example.com".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let mut parts = parts_with(None);
        let err = AuthenticatedUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_role_extractors() {
        let mut parts = parts_with(Some(user(Role::User)));
        assert!(CustomerUser::from_request_parts(&mut parts, &()).await.is_ok());
        let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let mut parts = parts_with(Some(user(Role::Admin)));
        assert!(AdminUser::from_request_parts(&mut parts, &()).await.is_ok());
        let err = CustomerUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_claims_with_non_numeric_subject_are_rejected() {
        let claims = JwtClaims {
            sub: "abc".to_string(),
            email: "dewi@example.com".to_string(),
            role: Role::User,
            jti: "1".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(AuthenticatedUser::try_from(claims).is_err());
    }
}
