//! Bearer-token extractors.

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller authenticated by a valid access token. Rejects with 401 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Caller identity when present.
///
/// A missing `Authorization` header yields `None`; a malformed or expired
/// token is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<Uuid>);

/// Token from the `Authorization` header, `None` if the header is absent
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

    Ok(Some(token))
}

fn authenticate(token: &str, state: &AppState) -> Result<Uuid, AppError> {
    let claims = validate_token(token, &state.jwt)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;
    Ok(claims.sub)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        Ok(AuthUser {
            user_id: authenticate(token, state)?,
        })
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(OptionalAuthUser(Some(authenticate(token, state)?))),
            None => Ok(OptionalAuthUser(None)),
        }
    }
}
