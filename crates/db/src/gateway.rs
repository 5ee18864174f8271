//! Storage seam for the help request service.
//!
//! The service is written against [`HelpRequestGateway`] so its decision
//! logic can run against PostgreSQL in production and against an in-memory
//! store in unit tests. [`PgGateway`] is the production implementation and
//! delegates to the repositories.

use aidhub_core::help_request::HelpRequestFilter;
use aidhub_core::types::DbId;
use async_trait::async_trait;

use crate::models::help_request::{HelpRequest, HelpRequestChanges, NewHelpRequest};
use crate::repositories::{ArticleRepo, HelpRequestRepo};
use crate::DbPool;

/// Load/save operations the help request service needs from storage.
///
/// Implementations perform no validation; they store what they are given.
/// Records returned are always fully materialized (lines populated).
#[async_trait]
pub trait HelpRequestGateway: Send + Sync {
    /// Requests matching `filter`, in a deterministic order.
    async fn list_help_requests(
        &self,
        filter: &HelpRequestFilter,
    ) -> Result<Vec<HelpRequest>, sqlx::Error>;

    async fn find_help_request(&self, id: DbId) -> Result<Option<HelpRequest>, sqlx::Error>;

    /// The subset of `article_ids` that does not exist in the catalog.
    async fn missing_articles(&self, article_ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error>;

    /// Persist a new request with its lines; returns the generated id.
    async fn insert_help_request(&self, input: &NewHelpRequest) -> Result<DbId, sqlx::Error>;

    /// Apply `changes`; returns `false` if the request does not exist.
    async fn update_help_request(
        &self,
        id: DbId,
        changes: &HelpRequestChanges,
    ) -> Result<bool, sqlx::Error>;

    /// Insert-or-overwrite the line keyed by `(help_request_id, article_id)`.
    async fn upsert_article(
        &self,
        help_request_id: DbId,
        article_id: DbId,
        amount: i32,
    ) -> Result<(), sqlx::Error>;

    /// Delete the line keyed by `(help_request_id, article_id)`; returns
    /// whether a row existed.
    async fn remove_article(&self, help_request_id: DbId, article_id: DbId)
        -> Result<bool, sqlx::Error>;
}

/// [`HelpRequestGateway`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgGateway {
    pool: DbPool,
}

impl PgGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HelpRequestGateway for PgGateway {
    async fn list_help_requests(
        &self,
        filter: &HelpRequestFilter,
    ) -> Result<Vec<HelpRequest>, sqlx::Error> {
        let rows = HelpRequestRepo::list(&self.pool, filter).await?;
        HelpRequestRepo::materialize(&self.pool, rows, filter.include_requester).await
    }

    async fn find_help_request(&self, id: DbId) -> Result<Option<HelpRequest>, sqlx::Error> {
        let Some(row) = HelpRequestRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let mut materialized = HelpRequestRepo::materialize(&self.pool, vec![row], false).await?;
        Ok(materialized.pop())
    }

    async fn missing_articles(&self, article_ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        ArticleRepo::find_missing(&self.pool, article_ids).await
    }

    async fn insert_help_request(&self, input: &NewHelpRequest) -> Result<DbId, sqlx::Error> {
        let row = HelpRequestRepo::create(&self.pool, input).await?;
        tracing::debug!(help_request_id = row.id, lines = input.articles.len(), "Inserted help request");
        Ok(row.id)
    }

    async fn update_help_request(
        &self,
        id: DbId,
        changes: &HelpRequestChanges,
    ) -> Result<bool, sqlx::Error> {
        Ok(HelpRequestRepo::update(&self.pool, id, changes).await?.is_some())
    }

    async fn upsert_article(
        &self,
        help_request_id: DbId,
        article_id: DbId,
        amount: i32,
    ) -> Result<(), sqlx::Error> {
        HelpRequestRepo::upsert_article(&self.pool, help_request_id, article_id, amount).await
    }

    async fn remove_article(
        &self,
        help_request_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        HelpRequestRepo::remove_article(&self.pool, help_request_id, article_id).await
    }
}
