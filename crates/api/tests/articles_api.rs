mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, get, get_auth, token_for};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_full_catalog(pool: PgPool) {
    let user = create_user(&pool, "reader").await;

    let response = get_auth(build_test_app(pool), "/api/v1/articles", &token_for(user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let articles = json.as_array().unwrap();
    assert_eq!(articles.len(), 8);
    assert_eq!(articles[0]["id"], 1);
    assert_eq!(articles[0]["name"], "Milch (1 l)");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_language(pool: PgPool) {
    let user = create_user(&pool, "reader").await;

    let json = body_json(
        get_auth(build_test_app(pool), "/api/v1/articles?language=en", &token_for(user)).await,
    )
    .await;
    let articles = json.as_array().unwrap();
    assert_eq!(articles.len(), 4);
    assert!(articles.iter().all(|a| a["language"] == "en"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsupported_language_is_rejected(pool: PgPool) {
    let user = create_user(&pool, "reader").await;

    let response =
        get_auth(build_test_app(pool), "/api/v1/articles?language=fr", &token_for(user)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_returns_article_or_404(pool: PgPool) {
    let user = create_user(&pool, "reader").await;
    let token = token_for(user);

    let found = get_auth(build_test_app(pool.clone()), "/api/v1/articles/7", &token).await;
    assert_eq!(found.status(), StatusCode::OK);
    let json = body_json(found).await;
    assert_eq!(json["name"], "Pasta (500 g)");
    assert_eq!(json["language"], "en");

    let missing = get_auth(build_test_app(pool), "/api/v1/articles/999", &token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_requires_authentication(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/articles").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
