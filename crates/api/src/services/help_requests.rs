//! Help request service: existence checks, payload normalization and the
//! article association protocol.
//!
//! Association writes are keyed by `(help request, article)`. Setting an
//! amount is an upsert and removing a line is idempotent, so both
//! per-article endpoints can be retried by clients without side effects
//! beyond the first application. Concurrent upserts on the same pair are
//! last-write-wins; there is no version column.

use aidhub_core::error::CoreError;
use aidhub_core::help_request::{merge_article_lines, validate_amount, ArticleLine, HelpRequestFilter};
use aidhub_core::types::DbId;
use aidhub_db::gateway::HelpRequestGateway;
use aidhub_db::models::help_request::{
    ArticleLineInput, CreateHelpRequest, HelpRequest, HelpRequestChanges, NewHelpRequest,
    SetArticleAmount, UpdateHelpRequest,
};
use validator::Validate;

use crate::error::AppResult;

/// Operations behind the `/help-requests` routes.
pub struct HelpRequestsService<G> {
    gateway: G,
}

impl<G: HelpRequestGateway> HelpRequestsService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Requests matching `filter`. An empty filter returns everything.
    pub async fn get_all(&self, filter: &HelpRequestFilter) -> AppResult<Vec<HelpRequest>> {
        Ok(self.gateway.list_help_requests(filter).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<HelpRequest> {
        self.gateway
            .find_help_request(id)
            .await?
            .ok_or_else(|| help_request_not_found(id).into())
    }

    /// Create a request owned by `requester_user_id`.
    ///
    /// Duplicate articles in the payload collapse to one line (last amount
    /// wins). Unknown articles fail with NotFound before anything is written.
    pub async fn create(
        &self,
        payload: &CreateHelpRequest,
        requester_user_id: DbId,
    ) -> AppResult<HelpRequest> {
        payload.validate()?;

        let articles = self.prepare_lines(payload.articles.as_deref()).await?;
        let input = NewHelpRequest {
            requester_user_id,
            status: payload.status.unwrap_or_default(),
            zip_code: payload.zip_code.clone(),
            articles: articles.unwrap_or_default(),
        };

        let id = self.gateway.insert_help_request(&input).await?;
        self.reload(id).await
    }

    /// Replace the fields present in `payload`. Requester and id never change.
    pub async fn update(&self, id: DbId, payload: &UpdateHelpRequest) -> AppResult<HelpRequest> {
        payload.validate()?;

        // Existence first, so a missing request reports as such even when
        // the payload also references unknown articles.
        self.get_by_id(id).await?;

        let changes = HelpRequestChanges {
            status: payload.status,
            zip_code: payload.zip_code.clone(),
            articles: self.prepare_lines(payload.articles.as_deref()).await?,
        };

        if !self.gateway.update_help_request(id, &changes).await? {
            return Err(help_request_not_found(id).into());
        }
        self.reload(id).await
    }

    /// Set the amount of `article_id` on `help_request`, inserting the line
    /// if it does not exist yet.
    pub async fn add_or_update_article(
        &self,
        help_request: &HelpRequest,
        article_id: DbId,
        payload: &SetArticleAmount,
    ) -> AppResult<HelpRequest> {
        payload.validate()?;
        validate_amount(payload.amount)?;
        self.ensure_articles_exist(&[article_id]).await?;

        self.gateway
            .upsert_article(help_request.id, article_id, payload.amount)
            .await?;
        self.reload(help_request.id).await
    }

    /// Remove the line for `article_id`. Removing an absent line is a no-op
    /// and still returns the current request.
    pub async fn remove_article(
        &self,
        help_request: &HelpRequest,
        article_id: DbId,
    ) -> AppResult<HelpRequest> {
        let removed = self
            .gateway
            .remove_article(help_request.id, article_id)
            .await?;
        if !removed {
            tracing::debug!(
                help_request_id = help_request.id,
                article_id,
                "No article line to remove"
            );
        }
        self.reload(help_request.id).await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Merge and existence-check a payload article list.
    async fn prepare_lines(
        &self,
        lines: Option<&[ArticleLineInput]>,
    ) -> AppResult<Option<Vec<ArticleLine>>> {
        let Some(lines) = lines else {
            return Ok(None);
        };
        let raw: Vec<ArticleLine> = lines.iter().map(ArticleLine::from).collect();
        let merged = merge_article_lines(&raw)?;

        let ids: Vec<DbId> = merged.iter().map(|l| l.article_id).collect();
        self.ensure_articles_exist(&ids).await?;
        Ok(Some(merged))
    }

    async fn ensure_articles_exist(&self, article_ids: &[DbId]) -> AppResult<()> {
        let missing = self.gateway.missing_articles(article_ids).await?;
        match missing.first() {
            Some(&id) => Err(CoreError::NotFound {
                entity: "Article",
                id,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Fetch the freshly written record.
    async fn reload(&self, id: DbId) -> AppResult<HelpRequest> {
        self.get_by_id(id).await
    }
}

fn help_request_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "HelpRequest",
        id,
    }
}
