use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Verified caller, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Gate for protected routes.
///
/// Every rejection produces the same 401 response; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Token rejected");
        ApiError::Unauthorized
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an account id");
        ApiError::Unauthorized
    })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::Unauthorized
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not valid ASCII");
        ApiError::Unauthorized
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => {
            tracing::debug!("Authorization header is not a bearer credential");
            Err(ApiError::Unauthorized)
        }
    }
}
