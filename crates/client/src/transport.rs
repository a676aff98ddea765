//! HTTP synchronization for the store.
//!
//! [`TaskApi`] is the seam the store talks through; [`HttpTaskApi`] is the
//! production implementation over the JSON API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use taskboard_core::project::{CreateProjectRequest, Project, UpdateProjectRequest};
use taskboard_core::task::{CreateTaskRequest, Task, UpdateTaskRequest};
use taskboard_core::types::DbId;

use crate::error::{ClientError, ClientResult};

/// Remote operations the store needs. One call per user action.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, project_id: Option<DbId>) -> ClientResult<Vec<Task>>;
    async fn create_task(&self, input: &CreateTaskRequest) -> ClientResult<Task>;
    async fn update_task(&self, id: DbId, input: &UpdateTaskRequest) -> ClientResult<Task>;
    async fn delete_task(&self, id: DbId) -> ClientResult<()>;

    async fn list_projects(&self) -> ClientResult<Vec<Project>>;
    async fn create_project(&self, input: &CreateProjectRequest) -> ClientResult<Project>;
    async fn update_project(&self, id: DbId, input: &UpdateProjectRequest) -> ClientResult<Project>;
    async fn delete_project(&self, id: DbId) -> ClientResult<()>;
}

/// Error body rendered by the server: `{ "error": ..., "code": ... }`.
#[derive(Deserialize)]
struct ApiErrorResponse {
    error: String,
}

/// [`TaskApi`] over HTTP with a Bearer session token.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        let message = serde_json::from_str::<ApiErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self, project_id: Option<DbId>) -> ClientResult<Vec<Task>> {
        let path = match project_id {
            Some(id) => format!("/api/tasks?projectId={id}"),
            None => "/api/tasks".to_string(),
        };
        let response = self.request(reqwest::Method::GET, &path).send().await?;
        Self::handle_response(response).await
    }

    async fn create_task(&self, input: &CreateTaskRequest) -> ClientResult<Task> {
        let response = self
            .request(reqwest::Method::POST, "/api/tasks")
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn update_task(&self, id: DbId, input: &UpdateTaskRequest) -> ClientResult<Task> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/api/tasks/{id}"))
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete_task(&self, id: DbId) -> ClientResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/tasks/{id}"))
            .send()
            .await?;
        Self::check_status(response).await.map(drop)
    }

    async fn list_projects(&self) -> ClientResult<Vec<Project>> {
        let response = self.request(reqwest::Method::GET, "/api/projects").send().await?;
        Self::handle_response(response).await
    }

    async fn create_project(&self, input: &CreateProjectRequest) -> ClientResult<Project> {
        let response = self
            .request(reqwest::Method::POST, "/api/projects")
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn update_project(&self, id: DbId, input: &UpdateProjectRequest) -> ClientResult<Project> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/api/projects/{id}"))
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete_project(&self, id: DbId) -> ClientResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/projects/{id}"))
            .send()
            .await?;
        Self::check_status(response).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpTaskApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000");
    }
}
