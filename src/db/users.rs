use sqlx::PgPool;

use crate::models::{Role, User};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
    hashed_password: &str,
    full_name: Option<&str>,
    role: Role,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, hashed_password, full_name, role)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(email)
    .bind(hashed_password)
    .bind(full_name)
    .bind(role)
    .fetch_one(executor)
    .await
}

/// Exact, case-sensitive match on the stored address.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn update_full_name(
    pool: &PgPool,
    id: i64,
    full_name: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET full_name = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(full_name)
    .fetch_one(pool)
    .await
}
