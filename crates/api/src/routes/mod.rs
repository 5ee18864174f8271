pub mod articles;
pub mod health;
pub mod help_requests;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /help-requests                                   list (filtered), create
/// /help-requests/{id}                              get, update
/// /help-requests/{id}/article/{article_id}         set amount (PUT), remove (DELETE)
///
/// /articles                                        list (?language=)
/// /articles/{id}                                   get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/help-requests", help_requests::router())
        .nest("/articles", articles::router())
}
