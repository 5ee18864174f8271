//! Help request and help-request-article models and DTOs.

use aidhub_core::help_request::{ArticleLine, HelpRequestStatus};
use aidhub_core::languages::AvailableLanguages;
use aidhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::article::Article;
use super::decode_text_column;
use super::user::RequesterSummary;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `help_requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct HelpRequestRow {
    pub id: DbId,
    pub requester_user_id: DbId,
    pub status: String,
    pub zip_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `help_request_articles` row joined with its catalog article.
#[derive(Debug, Clone, FromRow)]
pub struct HelpRequestArticleRow {
    pub help_request_id: DbId,
    pub article_id: DbId,
    pub amount: i32,
    pub article_name: String,
    pub article_language: String,
}

// ---------------------------------------------------------------------------
// Materialized records
// ---------------------------------------------------------------------------

/// One association line of a help request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestArticle {
    pub help_request_id: DbId,
    pub article_id: DbId,
    pub amount: i32,
    pub article: Article,
}

impl TryFrom<HelpRequestArticleRow> for HelpRequestArticle {
    type Error = sqlx::Error;

    fn try_from(row: HelpRequestArticleRow) -> Result<Self, Self::Error> {
        let language: AvailableLanguages =
            decode_text_column("article_language", &row.article_language)?;
        Ok(HelpRequestArticle {
            help_request_id: row.help_request_id,
            article_id: row.article_id,
            amount: row.amount,
            article: Article {
                id: row.article_id,
                name: row.article_name,
                language,
            },
        })
    }
}

/// A help request with its association collection populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: DbId,
    pub requester_user_id: DbId,
    pub status: HelpRequestStatus,
    pub zip_code: String,
    /// Ordered by article id.
    pub articles: Vec<HelpRequestArticle>,
    /// Only populated for listings requested with `includeRequester`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<RequesterSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HelpRequest {
    /// Combine a row with its association lines.
    pub fn assemble(
        row: HelpRequestRow,
        articles: Vec<HelpRequestArticle>,
        requester: Option<RequesterSummary>,
    ) -> Result<Self, sqlx::Error> {
        Ok(HelpRequest {
            id: row.id,
            requester_user_id: row.requester_user_id,
            status: decode_text_column("status", &row.status)?,
            zip_code: row.zip_code,
            articles,
            requester,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// The association line for `article_id`, if any.
    pub fn article(&self, article_id: DbId) -> Option<&HelpRequestArticle> {
        self.articles.iter().find(|a| a.article_id == article_id)
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// One `{ articleId, amount }` entry in a create/update payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArticleLineInput {
    pub article_id: DbId,
    #[validate(range(min = 1, message = "amount must be at least 1"))]
    pub amount: i32,
}

impl From<&ArticleLineInput> for ArticleLine {
    fn from(input: &ArticleLineInput) -> Self {
        ArticleLine {
            article_id: input.article_id,
            amount: input.amount,
        }
    }
}

/// DTO for `POST /help-requests`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHelpRequest {
    /// Defaults to `OPEN` if omitted.
    pub status: Option<HelpRequestStatus>,
    #[validate(length(min = 1, max = 16, message = "zipCode must be 1-16 characters"))]
    pub zip_code: String,
    #[validate(nested)]
    pub articles: Option<Vec<ArticleLineInput>>,
}

/// DTO for `PUT /help-requests/{id}`. All fields are optional; a present
/// `articles` list replaces the whole association set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHelpRequest {
    pub status: Option<HelpRequestStatus>,
    #[validate(length(min = 1, max = 16, message = "zipCode must be 1-16 characters"))]
    pub zip_code: Option<String>,
    #[validate(nested)]
    pub articles: Option<Vec<ArticleLineInput>>,
}

/// DTO for `PUT /help-requests/{id}/article/{articleId}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetArticleAmount {
    #[validate(range(min = 1, message = "amount must be at least 1"))]
    pub amount: i32,
}

// ---------------------------------------------------------------------------
// Normalized write commands
// ---------------------------------------------------------------------------

/// Validated input for inserting a help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHelpRequest {
    pub requester_user_id: DbId,
    pub status: HelpRequestStatus,
    pub zip_code: String,
    /// One line per article.
    pub articles: Vec<ArticleLine>,
}

/// Validated field replacements for an existing help request.
///
/// `None` leaves the column untouched. Requester and id are never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpRequestChanges {
    pub status: Option<HelpRequestStatus>,
    pub zip_code: Option<String>,
    /// One line per article; replaces the association set when present.
    pub articles: Option<Vec<ArticleLine>>,
}
