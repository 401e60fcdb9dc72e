use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::{Principal, ResolvedToken};

/// Authentication middleware for the staff routes: resolves the bearer
/// credential to a live token and asserts the principal is active.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resolved = resolve_token(&state, &headers).await?;
    authorize(&resolved)?;

    match &resolved.principal {
        Some(Principal::User(user)) => tracing::debug!("Authorized user {}", user.id),
        Some(Principal::Agent(agent)) => tracing::debug!("Authorized agent {}", agent.id),
        None => {}
    }

    Ok(next.run(request).await)
}

/// Resolve the `Authorization` header to a live token.
///
/// Unknown, revoked, and expired credentials all produce the same generic
/// 401 so callers learn nothing about why a credential is dead.
async fn resolve_token(state: &AppState, headers: &HeaderMap) -> Result<ResolvedToken, ApiError> {
    let credential = extract_bearer(headers)
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization header format"))?;

    state
        .store()
        .find_live_token(&credential)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))
}

/// The prefix check is case-sensitive and requires a single space.
fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let credential = value.strip_prefix("Bearer ")?;
    Some(credential.to_string())
}

/// Authorization gate: a resolved token must be bound to an active user or
/// an active agent. At most one branch can fail for a well-formed token.
pub fn authorize(resolved: &ResolvedToken) -> Result<(), ApiError> {
    match &resolved.principal {
        None => Err(ApiError::forbidden(
            "Valid user or agent authentication required",
        )),
        Some(Principal::User(user)) if !user.is_active => {
            Err(ApiError::forbidden("User account is inactive"))
        }
        Some(Principal::Agent(agent)) if !agent.is_active => {
            Err(ApiError::forbidden("Agent is inactive"))
        }
        Some(_) => Ok(()),
    }
}
