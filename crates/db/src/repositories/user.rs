use crate::models::DbUser;
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(
    pool: &Pool<Postgres>,
    username: &str,
    password_hash: &str,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating user: id={}, username={}", id, username);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO custom_users (id, username, password_hash, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, password_hash, created_at, last_login
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("User created successfully: id={}", id);
    Ok(user)
}

pub async fn get_user_by_username(pool: &Pool<Postgres>, username: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, password_hash, created_at, last_login
        FROM custom_users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn touch_last_login(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE custom_users
        SET last_login = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Verifies credentials against the stored Argon2 hash.
///
/// Returns the user record on success and `None` on failure. An unknown
/// username and a wrong password both come back as `None`; the distinction
/// is only logged, so the caller cannot leak which one failed.
pub async fn verify_credentials(
    pool: &Pool<Postgres>,
    username: &str,
    password: &str,
) -> Result<Option<DbUser>> {
    let Some(user) = get_user_by_username(pool, username).await? else {
        tracing::debug!("Credential check failed: username not found: {}", username);
        return Ok(None);
    };

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    if is_valid {
        Ok(Some(user))
    } else {
        tracing::debug!("Credential check failed: password mismatch for {}", username);
        Ok(None)
    }
}
