use crate::types::{AppError, Claims, Result};
use crate::AppState;
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

/// Raw bearer token as presented by the client, byte for byte.
///
/// The logout handler records this exact string in the revoked-token ledger;
/// the ledger check is a plain string equality, so the token must never be
/// re-encoded or normalized between here and there.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Gate in front of every protected route.
///
/// Extracts the bearer token from the `Authorization` header, verifies
/// signature and expiry, then checks the revoked-token ledger. On success the
/// claims and the raw token are inserted into request extensions for
/// downstream handlers. The gate itself never writes.
pub async fn auth_middleware(state: AppState, mut req: Request, next: Next) -> Result<Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if auth_header.is_empty() {
        return Err(AppError::MissingAuthorization);
    }

    // Token is everything after the first space ("Bearer <token>"). Owned
    // here so the header borrow ends before the request is mutated below.
    let token = auth_header
        .split_once(' ')
        .map(|(_, t)| t.to_string())
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MalformedAuthorization)?;

    let claims = state.auth.decode_token(&token)?;

    // Ledger lookup happens strictly after a successful signature+expiry
    // check, so unsigned tokens never reach the ledger.
    if state.store.is_token_revoked(&token).await? {
        return Err(AppError::TokenRevoked);
    }

    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}

// Extractors for claims and the raw token
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

/// Extractor yielding the authenticated user's claims.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BearerToken>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
