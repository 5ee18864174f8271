//! Handlers for the `/help-requests` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. Per-article routes
//! resolve the help request first, so a missing request is a 404 on both
//! PUT and DELETE.

use aidhub_core::types::DbId;
use aidhub_db::models::help_request::{
    CreateHelpRequest, HelpRequest, SetArticleAmount, UpdateHelpRequest,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::query::HelpRequestListQuery;
use crate::state::AppState;

/// GET /api/v1/help-requests
///
/// Filter by `userId` (integer or `me`), `excludeUserId`, `zipCode[]`,
/// `status[]`; `includeRequester` attaches requester info.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    query: HelpRequestListQuery,
) -> AppResult<Json<Vec<HelpRequest>>> {
    let filter = query.resolve(auth.user_id);
    let requests = state.help_requests().get_all(&filter).await?;
    Ok(Json(requests))
}

/// POST /api/v1/help-requests
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateHelpRequest>,
) -> AppResult<(StatusCode, Json<HelpRequest>)> {
    let request = state.help_requests().create(&input, auth.user_id).await?;

    tracing::info!(
        help_request_id = request.id,
        user_id = auth.user_id,
        articles = request.articles.len(),
        "Help request created",
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/help-requests/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<HelpRequest>> {
    let request = state.help_requests().get_by_id(id).await?;
    Ok(Json(request))
}

/// PUT /api/v1/help-requests/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateHelpRequest>,
) -> AppResult<Json<HelpRequest>> {
    let request = state.help_requests().update(id, &input).await?;

    tracing::info!(help_request_id = id, user_id = auth.user_id, "Help request updated");

    Ok(Json(request))
}

/// PUT /api/v1/help-requests/{id}/article/{article_id}
///
/// Upsert: sets the amount whether or not the article was already attached.
pub async fn put_article(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((id, article_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<SetArticleAmount>,
) -> AppResult<Json<HelpRequest>> {
    let service = state.help_requests();
    let help_request = service.get_by_id(id).await?;
    let request = service
        .add_or_update_article(&help_request, article_id, &input)
        .await?;

    tracing::info!(
        help_request_id = id,
        article_id,
        amount = input.amount,
        user_id = auth.user_id,
        "Help request article set",
    );

    Ok(Json(request))
}

/// DELETE /api/v1/help-requests/{id}/article/{article_id}
///
/// Idempotent: removing an article that is not attached returns the
/// request unchanged.
pub async fn remove_article(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((id, article_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<HelpRequest>> {
    let service = state.help_requests();
    let help_request = service.get_by_id(id).await?;
    let request = service.remove_article(&help_request, article_id).await?;

    tracing::info!(
        help_request_id = id,
        article_id,
        user_id = auth.user_id,
        "Help request article removed",
    );

    Ok(Json(request))
}
