//! Task entity: status/priority enumerations, the canonical wire shape and
//! the request DTOs accepted by the task endpoints.
//!
//! Storage keeps status and priority as SMALLINT ids referencing the
//! `task_statuses` / `task_priorities` lookup tables; the wire uses lowercase
//! strings (`todo`, `in-progress`, `done`; `low`, `medium`, `high`).

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::user::User;
use crate::validation::{require_non_blank, validate_input};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Lookup-table id type matching SMALLINT in the database.
pub type LookupId = i16;

/// Kanban column a task lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Every status in board column order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// The `task_statuses` lookup id.
    pub fn id(self) -> LookupId {
        match self {
            TaskStatus::Todo => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Done => 3,
        }
    }

    pub fn from_id(id: LookupId) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Parse the exact wire form. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Parse the wire form, falling back to [`TaskStatus::Todo`].
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

/// Task urgency. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// The `task_priorities` lookup id.
    pub fn id(self) -> LookupId {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
        }
    }

    pub fn from_id(id: LookupId) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// Parse the wire form, falling back to [`TaskPriority::Medium`].
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Name and color of the project a task belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectRef {
    pub name: String,
    pub color: String,
}

/// A task in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Task {
    #[ts(type = "number")]
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub tags: Vec<String>,
    #[ts(type = "number | null")]
    pub project_id: Option<DbId>,
    pub project: Option<ProjectRef>,
    #[ts(type = "number")]
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Case-insensitive substring match on the title. A blank query matches.
    pub fn title_matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty() || self.title.to_lowercase().contains(&needle)
    }

    /// Overdue means due strictly before `now` and not yet done.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < now)
    }
}

/// A task with its owner joined, returned by `GET /api/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/tasks`.
///
/// Status and priority arrive as raw values: anything that is not one of the
/// wire strings (including non-strings) falls back to `todo` / `medium`
/// rather than failing the request. A null `tags` means no tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTaskRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_nullable_tags")]
    #[validate(length(max = 20, message = "too many tags"))]
    pub tags: Vec<String>,
    #[ts(type = "number | null")]
    pub project_id: Option<DbId>,
}

impl CreateTaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority.as_str().to_string());
        self
    }

    pub fn with_due_date(mut self, due: Timestamp) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_project(mut self, project_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Validate and translate into storage-ready values.
    pub fn into_new_task(self) -> Result<NewTask, CoreError> {
        validate_input(&self)?;
        Ok(NewTask {
            title: require_non_blank("title", self.title)?,
            description: self.description,
            status: TaskStatus::parse_lenient(self.status.as_deref()),
            priority: TaskPriority::parse_lenient(self.priority.as_deref()),
            due_date: self.due_date,
            tags: normalize_tags(self.tags),
            project_id: self.project_id,
        })
    }
}

/// Validated insert values for a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub tags: Vec<String>,
    pub project_id: Option<DbId>,
}

/// Body of `PATCH /api/tasks/{id}`.
///
/// `title` and `status` are mandatory and `status` must be one of the three
/// wire values. Omitted optional fields keep their stored value; an explicit
/// `null` for `description` or `dueDate` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTaskRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub title: Option<String>,
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present_due_date",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub due_date: Option<Option<Timestamp>>,
    #[validate(length(max = 20, message = "too many tags"))]
    pub tags: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Full replacement body built from a task's current values.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            status: Some(task.status.as_str().to_string()),
            description: Some(task.description.clone()),
            priority: Some(task.priority.as_str().to_string()),
            due_date: Some(task.due_date),
            tags: Some(task.tags.clone()),
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    /// Validate and translate into the changes to apply.
    pub fn into_changes(self) -> Result<TaskChanges, CoreError> {
        validate_input(&self)?;
        let title = require_non_blank("title", self.title)?;
        let raw_status = self
            .status
            .ok_or_else(|| CoreError::Validation("status is required".into()))?;
        let status = TaskStatus::parse(&raw_status)
            .ok_or_else(|| CoreError::Validation(format!("invalid status '{raw_status}'")))?;
        let priority = self
            .priority
            .map(|raw| {
                TaskPriority::parse(&raw)
                    .ok_or_else(|| CoreError::Validation(format!("invalid priority '{raw}'")))
            })
            .transpose()?;

        Ok(TaskChanges {
            title,
            status,
            description: self.description,
            priority,
            due_date: self.due_date,
            tags: self.tags.map(normalize_tags),
        })
    }
}

/// Validated update values. Outer `None` leaves a column untouched;
/// `Some(None)` clears a nullable one.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskChanges {
    pub title: String,
    pub status: TaskStatus,
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<Timestamp>>,
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim tags, drop blanks and duplicates while keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Parse a due date given either as RFC 3339 or as a bare `YYYY-MM-DD`
/// (taken as midnight UTC).
pub fn parse_due_date(value: &str) -> Option<Timestamp> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Distinguishes a present `null` (`Some(None)`) from an absent key (`None`,
/// via `#[serde(default)]`).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn deserialize_present_due_date<'de, D>(
    deserializer: D,
) -> Result<Option<Option<Timestamp>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_due_date(deserializer).map(Some)
}

/// Any JSON value; only strings are kept, everything else reads as absent.
fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn deserialize_nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_due_date(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate '{value}'"))),
    }
}
