//! Repository for the `users` table.

use aidhub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CreateUser, RequesterSummary, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, created_at, updated_at";

/// Provides the user lookups help requests depend on.
pub struct UserRepo;

impl UserRepo {
    /// Insert a profile mirrored from the identity provider.
    ///
    /// Fills in name and email when a bare row for `id` already exists.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Make sure a row exists for an authenticated caller, so the requester
    /// foreign key holds for ids the identity provider issued but never
    /// mirrored. Existing rows are left untouched.
    pub async fn ensure_exists(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Requester summaries for the given ids. Unknown ids are skipped.
    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<RequesterSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, RequesterSummary>(
            "SELECT id, name FROM users WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
