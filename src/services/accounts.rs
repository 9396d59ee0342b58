/// Account lifecycle: registration, sessions, verification, password
/// management and account removal.
use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        jwt::{generate_access_token, generate_opaque_token, hash_token, JwtConfig},
        password::{hash_password, validate_password_strength, verify_password},
    },
    db::{CreateUser, FavoriteRepo, PostRepo, PostTable, RefreshTokenRepo, UserRepo},
    error::{AppError, AppResult},
    models::{AuthTokens, User, UserProfile},
    services::mailer::Mailer,
};

/// Collaborators for account operations
#[derive(Clone, Copy)]
pub struct AccountContext<'a> {
    pub pool: &'a PgPool,
    pub jwt: &'a JwtConfig,
    pub mailer: &'a dyn Mailer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(input: &RegisterRequest) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Name is required".to_string()));
    }

    let email = normalize_email(&input.email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(AppError::InvalidInput("Email is invalid".to_string())),
    }

    validate_password_strength(&input.password).map_err(AppError::InvalidInput)
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Access token plus a fresh refresh token and the hash to persist
fn new_token_pair(jwt: &JwtConfig, user_id: Uuid) -> AppResult<(AuthTokens, String)> {
    let access_token = generate_access_token(user_id, jwt)?;
    let (refresh_token, refresh_hash) = generate_opaque_token();

    Ok((
        AuthTokens {
            access_token,
            refresh_token,
        },
        refresh_hash,
    ))
}

async fn issue_tokens(ctx: &AccountContext<'_>, user_id: Uuid) -> AppResult<AuthTokens> {
    let (tokens, refresh_hash) = new_token_pair(ctx.jwt, user_id)?;
    let expires_at = Utc::now() + Duration::days(ctx.jwt.refresh_token_ttl_days);

    RefreshTokenRepo::create(ctx.pool, user_id, &refresh_hash, expires_at).await?;
    Ok(tokens)
}

async fn require_user(pool: &PgPool, user_id: Uuid) -> AppResult<User> {
    UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

fn check_password(user: &User, password: &str) -> AppResult<()> {
    if verify_password(password, &user.password_hash)? {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Password is incorrect".to_string()))
    }
}

pub async fn register(ctx: &AccountContext<'_>, input: RegisterRequest) -> AppResult<AuthTokens> {
    validate_registration(&input)?;
    let email = normalize_email(&input.email);

    if UserRepo::find_by_email(ctx.pool, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let (verify_token, verify_hash) = generate_opaque_token();
    let user = UserRepo::create(
        ctx.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email,
            password_hash: hash_password(&input.password)?,
            verify_token: verify_hash,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already registered".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    let (tokens, refresh_hash) = new_token_pair(ctx.jwt, user.id)?;
    let expires_at = Utc::now() + Duration::days(ctx.jwt.refresh_token_ttl_days);

    tokio::try_join!(
        async {
            RefreshTokenRepo::create(ctx.pool, user.id, &refresh_hash, expires_at)
                .await
                .map_err(AppError::from)
        },
        ctx.mailer
            .send_verification(&user.email, &user.name, &verify_token),
    )?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(tokens)
}

pub async fn login(ctx: &AccountContext<'_>, input: LoginRequest) -> AppResult<AuthTokens> {
    let email = normalize_email(&input.email);
    let invalid = || AppError::Unauthorized("Email or password is incorrect".to_string());

    let user = UserRepo::find_by_email(ctx.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&input.password, &user.password_hash)? {
        return Err(invalid());
    }

    tracing::info!(user_id = %user.id, "User logged in");
    issue_tokens(ctx, user.id).await
}

pub async fn logout(pool: &PgPool, refresh_token: &str) -> AppResult<()> {
    if !RefreshTokenRepo::delete(pool, &hash_token(refresh_token)).await? {
        return Err(AppError::not_found("Refresh token"));
    }
    Ok(())
}

/// Exchanges an unexpired refresh token for a new pair. The old token is consumed.
pub async fn refresh(ctx: &AccountContext<'_>, refresh_token: &str) -> AppResult<AuthTokens> {
    let stored = RefreshTokenRepo::consume(ctx.pool, &hash_token(refresh_token))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Refresh token is invalid or expired".to_string()))?;

    tracing::debug!(user_id = %stored.user_id, "Refresh token rotated");
    issue_tokens(ctx, stored.user_id).await
}

pub async fn verify_email(pool: &PgPool, token: &str) -> AppResult<UserProfile> {
    let user = UserRepo::mark_verified(pool, &hash_token(token))
        .await?
        .ok_or_else(|| AppError::not_found("Verification token"))?;

    tracing::info!(user_id = %user.id, "Email verified");
    Ok(UserProfile::from(&user))
}

pub async fn resend_verification(ctx: &AccountContext<'_>, user_id: Uuid) -> AppResult<()> {
    let user = require_user(ctx.pool, user_id).await?;
    if user.is_verified() {
        return Err(AppError::Conflict("Email already verified".to_string()));
    }

    let (token, hash) = generate_opaque_token();
    UserRepo::set_verify_token(ctx.pool, user.id, &hash).await?;
    ctx.mailer
        .send_verification(&user.email, &user.name, &token)
        .await
}

/// Starts a password reset. Unknown addresses succeed silently.
pub async fn forgot_password(ctx: &AccountContext<'_>, email: &str) -> AppResult<()> {
    let Some(user) = UserRepo::find_by_email(ctx.pool, &normalize_email(email)).await? else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(());
    };

    let (token, hash) = generate_opaque_token();
    UserRepo::set_forgot_password_token(ctx.pool, user.id, &hash).await?;
    ctx.mailer
        .send_password_reset(&user.email, &user.name, &token)
        .await
}

/// Sets a new password from a reset token and signs out every session.
pub async fn reset_password(pool: &PgPool, input: ResetPasswordRequest) -> AppResult<()> {
    validate_password_strength(&input.password).map_err(AppError::InvalidInput)?;
    let password_hash = hash_password(&input.password)?;

    let mut tx = pool.begin().await?;
    let user = UserRepo::reset_password(&mut *tx, &hash_token(&input.token), &password_hash)
        .await?
        .ok_or_else(|| AppError::not_found("Password reset token"))?;
    let revoked = RefreshTokenRepo::delete_by_user(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = %user.id, revoked, "Password reset");
    Ok(())
}

pub async fn get_me(pool: &PgPool, user_id: Uuid) -> AppResult<UserProfile> {
    let user = require_user(pool, user_id).await?;
    Ok(UserProfile::from(&user))
}

pub async fn update_me(
    pool: &PgPool,
    user_id: Uuid,
    input: UpdateProfileRequest,
) -> AppResult<UserProfile> {
    let name = input.name.as_deref().map(str::trim);
    if name.is_some_and(str::is_empty) {
        return Err(AppError::InvalidInput("Name must not be empty".to_string()));
    }

    let user = UserRepo::update_profile(pool, user_id, name, input.avatar.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(UserProfile::from(&user))
}

pub async fn change_password(
    pool: &PgPool,
    user_id: Uuid,
    input: ChangePasswordRequest,
) -> AppResult<()> {
    let user = require_user(pool, user_id).await?;
    check_password(&user, &input.old_password)?;
    validate_password_strength(&input.new_password).map_err(AppError::InvalidInput)?;

    UserRepo::update_password(pool, user.id, &hash_password(&input.new_password)?).await?;
    tracing::info!(user_id = %user.id, "Password changed");
    Ok(())
}

/// Removes the user and everything they own in one transaction.
///
/// Any failing step rolls the whole deletion back.
pub async fn delete_account(pool: &PgPool, user_id: Uuid, password: &str) -> AppResult<()> {
    let user = require_user(pool, user_id).await?;
    check_password(&user, password)?;

    let mut tx = pool.begin().await?;
    let favorites = FavoriteRepo::delete_by_user(&mut *tx, user.id).await?;
    let comments = PostRepo::delete_by_user(&mut *tx, PostTable::Comments, user.id).await?;
    let reviews = PostRepo::delete_by_user(&mut *tx, PostTable::Reviews, user.id).await?;
    let tokens = RefreshTokenRepo::delete_by_user(&mut *tx, user.id).await?;
    UserRepo::delete(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = %user.id,
        favorites,
        comments,
        reviews,
        tokens,
        "Account deleted"
    );
    Ok(())
}
