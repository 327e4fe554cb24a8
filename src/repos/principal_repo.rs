/*
 * Responsibility
 * - SQLx reads against the users table, by email
 * - Takes a PgPool and returns rows; mapping to Principal happens in the service layer
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, FromRow)]
pub struct PrincipalRow {
    pub email: String,
    pub role: Option<String>,
}

pub async fn find_by_email(db: &PgPool, email: &str) -> RepoResult<Option<PrincipalRow>> {
    let row = sqlx::query_as::<_, PrincipalRow>(
        r#"
        SELECT "email", "role"
        FROM users
        WHERE "email" = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
