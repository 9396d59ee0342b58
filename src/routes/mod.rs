use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::db::PostTable;
use crate::error::{AppError, AppResult};
use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod auth;
pub mod favorites;
pub mod media;
pub mod posts;
pub mod users;

/// `?page=` shared by every paginated endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

impl PageQuery {
    /// Requested page, defaulting to 1. Pages start at 1.
    pub fn page(&self) -> AppResult<i64> {
        validate_page(self.page)
    }
}

pub(crate) fn validate_page(page: Option<i64>) -> AppResult<i64> {
    match page {
        None => Ok(1),
        Some(page) if page >= 1 => Ok(page),
        Some(_) => Err(AppError::InvalidInput("page must be at least 1".to_string())),
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .merge(media_routes())
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:id", delete(favorites::remove))
        .nest("/comments", post_routes(PostTable::Comments))
        .nest("/reviews", post_routes(PostTable::Reviews))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/refresh-token", post(auth::refresh_token))
        .route("/verify-email", post(auth::verify_email))
        .route("/resend-verify-email", post(auth::resend_verify_email))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(users::get_me)
                .patch(users::update_me)
                .delete(users::delete_me),
        )
        .route("/me/password", put(users::change_password))
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/discover/movie", get(media::discover_movies))
        .route("/discover/tv", get(media::discover_tv))
        .route("/trending", get(media::trending))
        .route("/search", get(media::search))
        .route("/movies/:id", get(media::movie_details))
        .route("/movies/:id/recommendations", get(media::movie_recommendations))
        .route("/tv/:id", get(media::tv_details))
        .route("/tv/:id/recommendations", get(media::tv_recommendations))
        .route("/genres/:media_type", get(media::genres))
        .route("/people/:id", get(media::person))
        .route("/people/:id/credits", get(media::person_credits))
}

/// Comments and reviews share handlers; the table travels as an extension
fn post_routes(table: PostTable) -> Router<AppState> {
    Router::new()
        .route("/", post(posts::create))
        .route("/me", get(posts::list_mine))
        .route("/media/:media_type/:media_id", get(posts::list_for_media))
        .route("/:id", delete(posts::remove))
        .layer(Extension(table))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
