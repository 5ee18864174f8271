//! Repository for the `articles` catalog table.

use aidhub_core::languages::AvailableLanguages;
use aidhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleRow};

/// Column list for `articles` queries.
const COLUMNS: &str = "id, name, language, created_at, updated_at";

/// Read access to the article catalog.
pub struct ArticleRepo;

impl ArticleRepo {
    /// List the catalog ordered by id, optionally restricted to one language.
    pub async fn list(
        pool: &PgPool,
        language: Option<AvailableLanguages>,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let rows = match language {
            Some(lang) => {
                let query = format!("SELECT {COLUMNS} FROM articles WHERE language = $1 ORDER BY id");
                sqlx::query_as::<_, ArticleRow>(&query)
                    .bind(lang.as_str())
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM articles ORDER BY id");
                sqlx::query_as::<_, ArticleRow>(&query)
                    .fetch_all(pool)
                    .await?
            }
        };
        rows.into_iter().map(Article::try_from).collect()
    }

    /// Find an article by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Article::try_from)
            .transpose()
    }

    /// Return the subset of `ids` with no catalog row, in ascending order.
    pub async fn find_missing(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT wanted.id FROM UNNEST($1::BIGINT[]) AS wanted(id) \
             WHERE NOT EXISTS (SELECT 1 FROM articles a WHERE a.id = wanted.id) \
             ORDER BY wanted.id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
