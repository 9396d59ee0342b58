use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{AuthTokens, UserProfile},
    services::accounts::{
        self, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
        ResetPasswordRequest, TokenRequest,
    },
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthTokens>)> {
    let tokens = accounts::register(&state.accounts(), body).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthTokens>> {
    Ok(Json(accounts::login(&state.accounts(), body).await?))
}

pub async fn logout(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> AppResult<StatusCode> {
    accounts::logout(&state.pool, &body.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> AppResult<Json<AuthTokens>> {
    Ok(Json(
        accounts::refresh(&state.accounts(), &body.refresh_token).await?,
    ))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(accounts::verify_email(&state.pool, &body.token).await?))
}

pub async fn resend_verify_email(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Value>> {
    accounts::resend_verification(&state.accounts(), user.user_id).await?;
    Ok(Json(json!({ "message": "Verification email sent" })))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> AppResult<Json<Value>> {
    accounts::forgot_password(&state.accounts(), &body.email).await?;
    Ok(Json(
        json!({ "message": "If the email is registered, a reset link has been sent" }),
    ))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<Json<Value>> {
    accounts::reset_password(&state.pool, body).await?;
    Ok(Json(json!({ "message": "Password has been reset" })))
}
