use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::RefreshToken;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: i64,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<RefreshToken, sqlx::Error> {
    sqlx::query_as::<_, RefreshToken>(
        "INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .fetch_one(executor)
    .await
}

/// Revoke a live token and hand it back. Returns `None` when the token is unknown, already
/// revoked or expired. Only one of any number of concurrent callers can win the row.
pub async fn consume<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    token_hash: &str,
) -> Result<Option<RefreshToken>, sqlx::Error> {
    sqlx::query_as::<_, RefreshToken>(
        "UPDATE refresh_tokens SET revoked = true, updated_at = now()
         WHERE token_hash = $1 AND revoked = false AND expires_at > now()
         RETURNING *",
    )
    .bind(token_hash)
    .fetch_optional(executor)
    .await
}

/// Idempotent: unknown or already-revoked tokens are left alone.
pub async fn revoke_by_hash(pool: &PgPool, token_hash: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE refresh_tokens SET revoked = true, updated_at = now()
         WHERE token_hash = $1 AND revoked = false",
    )
    .bind(token_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
