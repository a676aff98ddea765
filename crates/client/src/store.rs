//! The session's task and project collections.
//!
//! Mutations go to the server first; local state only changes once the
//! server has answered, and then takes the server's record verbatim. A
//! failed call raises an error notification and hands the error back so the
//! caller can react (e.g. keep a form open). Nothing is retried.

use std::sync::Arc;

use chrono::TimeZone;
use taskboard_core::analytics::{compute_analytics, Analytics};
use taskboard_core::board::{group_tasks, resolve_drop, Board, BoardFilter};
use taskboard_core::calendar::CalendarIndex;
use taskboard_core::project::{CreateProjectRequest, Project, UpdateProjectRequest};
use taskboard_core::task::{CreateTaskRequest, ProjectRef, Task, TaskStatus, UpdateTaskRequest};
use taskboard_core::types::{DbId, Timestamp};
use tokio::sync::watch;

use crate::error::{ClientError, ClientResult};
use crate::notify::{NotificationLevel, Notifier};
use crate::transport::TaskApi;

/// Point-in-time view of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// Newest first, as listed by the server.
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    /// Whether the initial load has completed.
    pub loaded: bool,
}

impl StoreSnapshot {
    pub fn task(&self, id: DbId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: DbId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn adjust_task_count(&mut self, project_id: Option<DbId>, delta: i64) {
        if let Some(project) = project_id.and_then(|id| self.projects.iter_mut().find(|p| p.id == id)) {
            project.tasks_count = (project.tasks_count + delta).max(0);
        }
    }
}

/// Client-side store, constructed once per session.
pub struct TaskStore {
    api: Arc<dyn TaskApi>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<StoreSnapshot>,
}

impl TaskStore {
    pub fn new(api: Arc<dyn TaskApi>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            api,
            notifier,
            state,
        }
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Fetch all tasks and projects, replacing local state.
    pub async fn load(&self) -> ClientResult<()> {
        let tasks = self.report("load tasks", self.api.list_tasks(None).await)?;
        let projects = self.report("load projects", self.api.list_projects().await)?;
        tracing::debug!(tasks = tasks.len(), projects = projects.len(), "Store loaded");
        self.state.send_replace(StoreSnapshot {
            tasks,
            projects,
            loaded: true,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub async fn add_task(&self, input: CreateTaskRequest) -> ClientResult<Task> {
        let task = self.report("create task", self.api.create_task(&input).await)?;
        self.state.send_modify(|s| {
            s.adjust_task_count(task.project_id, 1);
            s.tasks.insert(0, task.clone());
        });
        self.success("Task created");
        Ok(task)
    }

    pub async fn update_task(&self, id: DbId, input: UpdateTaskRequest) -> ClientResult<Task> {
        let task = self.report("update task", self.api.update_task(id, &input).await)?;
        self.state.send_modify(|s| {
            if let Some(slot) = s.tasks.iter_mut().find(|t| t.id == id) {
                *slot = task.clone();
            }
        });
        self.success("Task updated");
        Ok(task)
    }

    /// Change only a task's status, keeping every other field as stored locally.
    pub async fn move_task(&self, id: DbId, status: TaskStatus) -> ClientResult<Task> {
        let current = self.state.borrow().task(id).cloned();
        let Some(current) = current else {
            return self.report(
                "move task",
                Err(ClientError::NotFound(format!("task {id} is not loaded"))),
            );
        };
        self.update_task(id, UpdateTaskRequest::from_task(&current).with_status(status))
            .await
    }

    /// Apply a kanban drop. `destination` is `None` for a drop outside any
    /// column. Returns the updated task, or `None` when nothing changed.
    pub async fn drop_task(
        &self,
        id: DbId,
        destination: Option<TaskStatus>,
    ) -> ClientResult<Option<Task>> {
        let change = resolve_drop(&self.state.borrow().tasks, id, destination);
        match change {
            Some(change) => self.move_task(change.task_id, change.to).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn delete_task(&self, id: DbId) -> ClientResult<()> {
        self.report("delete task", self.api.delete_task(id).await)?;
        self.state.send_modify(|s| {
            if let Some(pos) = s.tasks.iter().position(|t| t.id == id) {
                let removed = s.tasks.remove(pos);
                s.adjust_task_count(removed.project_id, -1);
            }
        });
        self.success("Task deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub async fn add_project(&self, input: CreateProjectRequest) -> ClientResult<Project> {
        let project = self.report("create project", self.api.create_project(&input).await)?;
        self.state.send_modify(|s| s.projects.insert(0, project.clone()));
        self.success("Project created");
        Ok(project)
    }

    /// Update a project and refresh the project name/color carried by its tasks.
    pub async fn update_project(&self, id: DbId, input: UpdateProjectRequest) -> ClientResult<Project> {
        let project = self.report("update project", self.api.update_project(id, &input).await)?;
        self.state.send_modify(|s| {
            if let Some(slot) = s.projects.iter_mut().find(|p| p.id == id) {
                *slot = project.clone();
            }
            for task in s.tasks.iter_mut().filter(|t| t.project_id == Some(id)) {
                task.project = Some(ProjectRef {
                    name: project.name.clone(),
                    color: project.color.clone(),
                });
            }
        });
        self.success("Project updated");
        Ok(project)
    }

    /// Delete a project. Its tasks stay, unassigned.
    pub async fn delete_project(&self, id: DbId) -> ClientResult<()> {
        self.report("delete project", self.api.delete_project(id).await)?;
        self.state.send_modify(|s| {
            s.projects.retain(|p| p.id != id);
            for task in s.tasks.iter_mut().filter(|t| t.project_id == Some(id)) {
                task.project_id = None;
                task.project = None;
            }
        });
        self.success("Project deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    pub fn board(&self, filter: &BoardFilter) -> Board {
        group_tasks(&self.state.borrow().tasks, filter)
    }

    pub fn calendar<Tz: TimeZone>(&self, tz: &Tz) -> CalendarIndex {
        CalendarIndex::build(&self.state.borrow().tasks, tz)
    }

    pub fn analytics<Tz: TimeZone>(&self, now: Timestamp, tz: &Tz) -> Analytics {
        let state = self.state.borrow();
        compute_analytics(&state.tasks, &state.projects, now, tz)
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    fn report<T>(&self, action: &str, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(err) = &result {
            tracing::warn!(action, error = %err, "Store operation failed");
            self.notifier
                .notify(NotificationLevel::Error, &format!("Failed to {action}: {err}"));
        }
        result
    }

    fn success(&self, message: &str) {
        self.notifier.notify(NotificationLevel::Success, message);
    }
}
