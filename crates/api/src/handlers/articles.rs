//! Handlers for the read-only `/articles` catalog.

use aidhub_core::error::CoreError;
use aidhub_core::types::DbId;
use aidhub_db::models::article::{Article, ArticleListParams};
use aidhub_db::repositories::ArticleRepo;
use axum::extract::State;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/articles
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ArticleListParams>,
) -> AppResult<Json<Vec<Article>>> {
    let articles = ArticleRepo::list(&state.pool, params.language).await?;
    Ok(Json(articles))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Article>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;
    Ok(Json(article))
}
