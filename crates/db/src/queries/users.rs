use crate::models::User;
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use skyfare_types::enums::UserRole;

/// Find user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Find user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Create a user row. Credential handling lives with the external auth
/// collaborator; the hash is stored opaquely.
pub async fn insert(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    full_name: Option<&str>,
    role: UserRole,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
