//! [`HttpTaskApi`] against the real router served on a local port.

use std::path::PathBuf;
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use taskboard_api::auth::jwt::{generate_access_token, JwtConfig};
use taskboard_api::config::ServerConfig;
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_client::{ClientError, HttpTaskApi, TaskApi};
use taskboard_core::project::CreateProjectRequest;
use taskboard_core::task::{CreateTaskRequest, TaskPriority, TaskStatus, UpdateTaskRequest};
use taskboard_core::user::SignIn;
use taskboard_db::repositories::UserRepo;
use tokio::net::TcpListener;

fn config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        static_dir: PathBuf::from("./does-not-exist"),
        login_path: "/login".to_string(),
        provider_secret: "test-provider-secret".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Serve the app on an ephemeral port and return its base URL.
async fn serve(pool: PgPool) -> String {
    let config = config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn signed_in(pool: &PgPool, base_url: &str) -> HttpTaskApi {
    let user = UserRepo::upsert_by_email(
        pool,
        &SignIn {
            email: "client@example.com".to_string(),
            name: None,
            image: None,
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, &user.email, &config().jwt).unwrap();
    HttpTaskApi::new(base_url).unwrap().with_token(token)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_round_trips_wire_form(pool: PgPool) {
    let base_url = serve(pool.clone()).await;
    let api = signed_in(&pool, &base_url).await;
    let due = Utc.with_ymd_and_hms(2024, 7, 15, 9, 30, 0).unwrap();

    let project = api
        .create_project(&CreateProjectRequest::new("Demo", "green"))
        .await
        .unwrap();
    let task = api
        .create_task(
            &CreateTaskRequest::new("Ship it")
                .with_status(TaskStatus::InProgress)
                .with_priority(TaskPriority::High)
                .with_due_date(due)
                .with_tags(["release"])
                .with_project(project.id),
        )
        .await
        .unwrap();

    assert_eq!(task.title, "Ship it");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.due_date, Some(due));
    assert_eq!(task.project.as_ref().unwrap().name, "Demo");

    let listed = api.list_tasks(Some(project.id)).await.unwrap();
    assert_eq!(listed, vec![task]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_can_clear_due_date(pool: PgPool) {
    let base_url = serve(pool.clone()).await;
    let api = signed_in(&pool, &base_url).await;
    let due = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
    let task = api
        .create_task(&CreateTaskRequest::new("Dated").with_due_date(due))
        .await
        .unwrap();

    let mut input = UpdateTaskRequest::from_task(&task).with_status(TaskStatus::Done);
    input.due_date = Some(None);
    let updated = api.update_task(task.id, &input).await.unwrap();
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.due_date, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn error_statuses_map_to_variants(pool: PgPool) {
    let base_url = serve(pool.clone()).await;
    let api = signed_in(&pool, &base_url).await;

    let err = api.create_task(&CreateTaskRequest::new("   ")).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(msg) if msg == "title is required");

    let update = UpdateTaskRequest {
        title: Some("x".into()),
        status: Some("todo".into()),
        ..Default::default()
    };
    let err = api.update_task(999_999, &update).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound(_));

    let err = api.delete_project(999_999).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound(_));

    let anonymous = HttpTaskApi::new(&base_url).unwrap();
    let err = anonymous.list_tasks(None).await.unwrap_err();
    assert_matches!(err, ClientError::Unauthorized);
}
