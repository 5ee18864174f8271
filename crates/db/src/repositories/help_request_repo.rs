//! Repository for the `help_requests` and `help_request_articles` tables.
//!
//! Association rows are keyed by `(help_request_id, article_id)`: writes go
//! through `ON CONFLICT` so a pair never has more than one row.

use std::collections::HashMap;

use aidhub_core::help_request::{ArticleLine, HelpRequestFilter};
use aidhub_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::help_request::{
    HelpRequest, HelpRequestArticle, HelpRequestArticleRow, HelpRequestChanges, HelpRequestRow,
    NewHelpRequest,
};
use crate::repositories::UserRepo;

/// Column list for `help_requests` queries.
const COLUMNS: &str = "id, requester_user_id, status, zip_code, created_at, updated_at";

/// Column list for association lines joined with `articles`.
const LINE_COLUMNS: &str = "hra.help_request_id, hra.article_id, hra.amount, \
    a.name AS article_name, a.language AS article_language";

/// Provides CRUD operations for help requests and their article lines.
pub struct HelpRequestRepo;

impl HelpRequestRepo {
    // -----------------------------------------------------------------------
    // Help requests
    // -----------------------------------------------------------------------

    /// Insert a help request and its initial lines in one transaction.
    ///
    /// The requester's `users` row is created on the fly when missing.
    pub async fn create(pool: &PgPool, input: &NewHelpRequest) -> Result<HelpRequestRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        UserRepo::ensure_exists(&mut *tx, input.requester_user_id).await?;

        let insert_query = format!(
            "INSERT INTO help_requests (requester_user_id, status, zip_code) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, HelpRequestRow>(&insert_query)
            .bind(input.requester_user_id)
            .bind(input.status.as_str())
            .bind(&input.zip_code)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_lines_inner(&mut tx, row.id, &input.articles).await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Find a help request row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HelpRequestRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM help_requests WHERE id = $1");
        sqlx::query_as::<_, HelpRequestRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List rows matching `filter`, ordered by id.
    pub async fn list(
        pool: &PgPool,
        filter: &HelpRequestFilter,
    ) -> Result<Vec<HelpRequestRow>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM help_requests WHERE TRUE"));

        if let Some(user_id) = filter.user_id {
            builder.push(" AND requester_user_id = ").push_bind(user_id);
        }
        if let Some(exclude_user_id) = filter.exclude_user_id {
            builder
                .push(" AND requester_user_id <> ")
                .push_bind(exclude_user_id);
        }
        if !filter.zip_codes.is_empty() {
            builder
                .push(" AND zip_code = ANY(")
                .push_bind(filter.zip_code_list())
                .push(")");
        }
        if !filter.statuses.is_empty() {
            builder
                .push(" AND status = ANY(")
                .push_bind(filter.status_list())
                .push(")");
        }
        builder.push(" ORDER BY id");

        builder
            .build_query_as::<HelpRequestRow>()
            .fetch_all(pool)
            .await
    }

    /// Apply field replacements. Only non-`None` fields are written.
    ///
    /// If `articles` is `Some`, replaces all lines. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &HelpRequestChanges,
    ) -> Result<Option<HelpRequestRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE help_requests SET \
                status = COALESCE($2, status), \
                zip_code = COALESCE($3, zip_code) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, HelpRequestRow>(&update_query)
            .bind(id)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.zip_code.as_deref())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(lines) = &changes.articles {
            sqlx::query("DELETE FROM help_request_articles WHERE help_request_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::set_lines_inner(&mut tx, id, lines).await?;
        }

        tx.commit().await?;
        Ok(Some(row))
    }

    // -----------------------------------------------------------------------
    // Article lines
    // -----------------------------------------------------------------------

    /// Insert the line for `(help_request_id, article_id)` or overwrite its amount.
    pub async fn upsert_article(
        pool: &PgPool,
        help_request_id: DbId,
        article_id: DbId,
        amount: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO help_request_articles (help_request_id, article_id, amount) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_help_request_articles_request_article \
             DO UPDATE SET amount = EXCLUDED.amount",
        )
        .bind(help_request_id)
        .bind(article_id)
        .bind(amount)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete the line for `(help_request_id, article_id)`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn remove_article(
        pool: &PgPool,
        help_request_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM help_request_articles WHERE help_request_id = $1 AND article_id = $2",
        )
        .bind(help_request_id)
        .bind(article_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lines of all given help requests, ordered by request then article id.
    pub async fn lines_for(
        pool: &PgPool,
        help_request_ids: &[DbId],
    ) -> Result<Vec<HelpRequestArticleRow>, sqlx::Error> {
        if help_request_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {LINE_COLUMNS} \
             FROM help_request_articles hra \
             JOIN articles a ON a.id = hra.article_id \
             WHERE hra.help_request_id = ANY($1) \
             ORDER BY hra.help_request_id, hra.article_id"
        );
        sqlx::query_as::<_, HelpRequestArticleRow>(&query)
            .bind(help_request_ids)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Materialization
    // -----------------------------------------------------------------------

    /// Attach lines (and optionally requester summaries) to rows.
    ///
    /// Issues one query for all lines and at most one for requesters, and
    /// keeps the input order.
    pub async fn materialize(
        pool: &PgPool,
        rows: Vec<HelpRequestRow>,
        include_requester: bool,
    ) -> Result<Vec<HelpRequest>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();

        let mut lines_by_request: HashMap<DbId, Vec<HelpRequestArticle>> = HashMap::new();
        for line in Self::lines_for(pool, &ids).await? {
            lines_by_request
                .entry(line.help_request_id)
                .or_default()
                .push(HelpRequestArticle::try_from(line)?);
        }

        let mut requesters = HashMap::new();
        if include_requester {
            let mut requester_ids: Vec<DbId> = rows.iter().map(|r| r.requester_user_id).collect();
            requester_ids.sort_unstable();
            requester_ids.dedup();
            for summary in UserRepo::find_summaries(pool, &requester_ids).await? {
                requesters.insert(summary.id, summary);
            }
        }

        rows.into_iter()
            .map(|row| {
                let lines = lines_by_request.remove(&row.id).unwrap_or_default();
                let requester = requesters.get(&row.requester_user_id).cloned();
                HelpRequest::assemble(row, lines, requester)
            })
            .collect()
    }

    /// Insert lines for a help request inside an open transaction.
    async fn set_lines_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        help_request_id: DbId,
        lines: &[ArticleLine],
    ) -> Result<(), sqlx::Error> {
        for line in lines {
            sqlx::query(
                "INSERT INTO help_request_articles (help_request_id, article_id, amount) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT ON CONSTRAINT uq_help_request_articles_request_article \
                 DO UPDATE SET amount = EXCLUDED.amount",
            )
            .bind(help_request_id)
            .bind(line.article_id)
            .bind(line.amount)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
