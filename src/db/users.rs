use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::User;

const COLUMNS: &str = "id, name, email, password_hash, avatar, verify_token, \
    forgot_password_token, created_at, updated_at";

/// Fields for a new account. Token values are already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub verify_token: String,
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email, password_hash, verify_token)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.verify_token)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Clear the verification token matching `token_hash`.
    pub async fn mark_verified(pool: &PgPool, token_hash: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET verify_token = NULL, updated_at = now()
             WHERE verify_token = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_verify_token(
        pool: &PgPool,
        id: Uuid,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET verify_token = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_forgot_password_token(
        pool: &PgPool,
        id: Uuid,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET forgot_password_token = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the password of the user holding `token_hash` and consume the token.
    pub async fn reset_password(
        conn: &mut PgConnection,
        token_hash: &str,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users
             SET password_hash = $2, forgot_password_token = NULL, updated_at = now()
             WHERE forgot_password_token = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .bind(password_hash)
            .fetch_optional(conn)
            .await
    }

    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial profile update. `None` keeps the current value.
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users
             SET name = COALESCE($2, name), avatar = COALESCE($3, avatar), updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(name)
            .bind(avatar)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
