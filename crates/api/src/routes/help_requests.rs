//! Route definitions for help requests.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::help_requests;
use crate::state::AppState;

/// Routes mounted at `/help-requests`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// PUT    /{id}/article/{article_id}     -> put_article
/// DELETE /{id}/article/{article_id}     -> remove_article
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(help_requests::list).post(help_requests::create))
        .route(
            "/{id}",
            get(help_requests::get_by_id).put(help_requests::update),
        )
        .route(
            "/{id}/article/{article_id}",
            put(help_requests::put_article).delete(help_requests::remove_article),
        )
}
