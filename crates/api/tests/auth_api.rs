//! HTTP-level integration tests for session exchange, the page guard and
//! static file serving.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_auth, post_json, PROVIDER_SECRET};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;

fn session_request(secret: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/session")
        .header("content-type", "application/json")
        .header("x-provider-secret", secret)
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Session exchange
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn session_exchange_creates_user_and_sets_cookie(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::send(
        app,
        session_request(PROVIDER_SECRET, json!({ "email": "Ada@Example.com", "name": "Ada" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("taskboard_session="));

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert_eq!(json["expiresIn"], 15 * 60);
    let token = json["accessToken"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let me = body_json(get_auth(app, "/api/auth/me", &token).await).await;
    assert_eq!(me["name"], "Ada");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_sign_in_reuses_user(pool: PgPool) {
    let mut ids = Vec::new();
    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = common::send(
            app,
            session_request(PROVIDER_SECRET, json!({ "email": "ada@example.com" })),
        )
        .await;
        ids.push(body_json(response).await["user"]["id"].clone());
    }
    assert_eq!(ids[0], ids[1]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn session_exchange_requires_provider_secret(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::send(app, session_request("wrong", json!({ "email": "a@b.co" }))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/session", json!({ "email": "a@b.co" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn session_exchange_validates_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::send(app, session_request(PROVIDER_SECRET, json!({ "email": "nope" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_requires_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    assert_eq!(get(app, "/api/auth/me").await.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sign_out_clears_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/sign-out", json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Page guard and static files
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unauthenticated_page_redirects_to_login(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/board?projectId=3").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/login?callbackUrl=%2Fboard%3FprojectId%3D3"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_and_api_are_not_redirected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"]["reachable"], true);

    let app = common::build_test_app(pool);
    assert_eq!(get(app, "/api/tasks").await.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_is_503_when_database_is_gone(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    pool.close().await;
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"]["reachable"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_api_path_is_json_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signed_in_navigation_serves_web_client(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>taskboard</html>").unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();

    let mut config = common::test_config();
    config.static_dir = dir.path().to_path_buf();
    let (_user, token) = common::create_user(&pool, "ada@example.com").await;

    // Public asset without a session.
    let app = common::build_test_app_with(pool.clone(), config.clone());
    let response = get(app, "/assets/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Client-side route with a session cookie falls back to index.html.
    let app = common::build_test_app_with(pool, config);
    let request = Request::builder()
        .uri("/calendar")
        .header("cookie", format!("taskboard_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<html>taskboard</html>");
}
