//! Catalog article model.

use aidhub_core::languages::AvailableLanguages;
use aidhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::decode_text_column;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: DbId,
    pub name: String,
    pub language: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A catalog article. The name carries its unit (e.g. `"Milk (1 l)"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: DbId,
    pub name: String,
    pub language: AvailableLanguages,
}

impl TryFrom<ArticleRow> for Article {
    type Error = sqlx::Error;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: row.id,
            name: row.name,
            language: decode_text_column("language", &row.language)?,
        })
    }
}

/// Query parameters for `GET /api/v1/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListParams {
    pub language: Option<AvailableLanguages>,
}
