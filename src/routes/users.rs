use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::UserProfile,
    services::accounts::{self, ChangePasswordRequest, DeleteAccountRequest, UpdateProfileRequest},
    state::AppState,
};

pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserProfile>> {
    Ok(Json(accounts::get_me(&state.pool, user.user_id).await?))
}

pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(
        accounts::update_me(&state.pool, user.user_id, body).await?,
    ))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    accounts::change_password(&state.pool, user.user_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes the caller's account and everything it owns
pub async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<DeleteAccountRequest>,
) -> AppResult<StatusCode> {
    accounts::delete_account(&state.pool, user.user_id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
