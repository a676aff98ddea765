//! Project entity wire shape and request DTOs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::validation::{require_non_blank, validate_input};

/// Color tag applied to projects created without one.
pub const DEFAULT_PROJECT_COLOR: &str = "blue";

/// A project in wire form. `tasksCount` is computed at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Project {
    #[ts(type = "number")]
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub color: String,
    #[ts(type = "number")]
    pub user_id: DbId,
    #[ts(type = "number")]
    pub tasks_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /api/projects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateProjectRequest {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub color: Option<String>,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
            color: Some(color.into()),
        }
    }

    /// Validate and fill defaults: empty description, default color.
    pub fn into_new_project(self) -> Result<NewProject, CoreError> {
        validate_input(&self)?;
        Ok(NewProject {
            name: require_non_blank("name", self.name)?,
            description: self.description.unwrap_or_default(),
            color: self
                .color
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
        })
    }
}

/// Validated insert values for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Body of `PATCH /api/projects/{id}`. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 32, message = "must be 1 to 32 characters"))]
    pub color: Option<String>,
}

impl UpdateProjectRequest {
    pub fn into_changes(self) -> Result<Self, CoreError> {
        validate_input(&self)?;
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CoreError::Validation("name must not be blank".into()));
        }
        Ok(Self {
            name: self.name.map(|n| n.trim().to_string()),
            ..self
        })
    }
}
