//! Analytics aggregation over an in-memory task collection.
//!
//! Counts and percentages for the dashboard, a priority histogram, a
//! trailing seven-day activity series and per-project task counts. All
//! figures are computed in a constant number of passes over the input.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calendar::local_day;
use crate::project::Project;
use crate::task::{Task, TaskPriority, TaskStatus};
use crate::types::{DbId, Timestamp};

/// Length of the trailing activity series, in days.
pub const ACTIVITY_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriorityHistogram {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Activity for one local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyActivity {
    pub date: NaiveDate,
    /// Tasks created that day.
    pub created: usize,
    /// Done tasks due that day.
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProjectTaskCount {
    #[ts(type = "number")]
    pub project_id: DbId,
    pub name: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Analytics {
    pub total: usize,
    pub completed: usize,
    /// Whole percent of tasks done.
    pub completion_rate: u32,
    pub in_progress: usize,
    pub in_progress_rate: u32,
    pub overdue: usize,
    pub priority: PriorityHistogram,
    pub weekly_activity: Vec<DailyActivity>,
    pub projects: Vec<ProjectTaskCount>,
}

/// `part / total` as a whole percentage, rounded half up. Zero when `total` is zero.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 100 + total / 2) / total;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Aggregate `tasks` as of `now`, bucketing days in `tz`.
///
/// `projects` drives the per-project breakdown; projects with no matching
/// task are omitted and the input order is kept.
pub fn compute_analytics<Tz: TimeZone>(
    tasks: &[Task],
    projects: &[Project],
    now: Timestamp,
    tz: &Tz,
) -> Analytics {
    let today = local_day(&now, tz);
    let window_start = today
        .checked_sub_days(Days::new(ACTIVITY_WINDOW_DAYS - 1))
        .unwrap_or(today);

    let mut completed = 0;
    let mut in_progress = 0;
    let mut overdue = 0;
    let mut priority = PriorityHistogram::default();
    let mut created_by_day: HashMap<NaiveDate, usize> = HashMap::new();
    let mut completed_by_day: HashMap<NaiveDate, usize> = HashMap::new();
    let mut per_project: HashMap<DbId, usize> = HashMap::new();

    for task in tasks {
        match task.status {
            TaskStatus::Done => completed += 1,
            TaskStatus::InProgress => in_progress += 1,
            TaskStatus::Todo => {}
        }
        if task.is_overdue(now) {
            overdue += 1;
        }
        match task.priority {
            TaskPriority::Low => priority.low += 1,
            TaskPriority::Medium => priority.medium += 1,
            TaskPriority::High => priority.high += 1,
        }

        let created = local_day(&task.created_at, tz);
        if created >= window_start && created <= today {
            *created_by_day.entry(created).or_default() += 1;
        }
        if task.status == TaskStatus::Done {
            if let Some(due) = &task.due_date {
                *completed_by_day.entry(local_day(due, tz)).or_default() += 1;
            }
        }
        if let Some(project_id) = task.project_id {
            *per_project.entry(project_id).or_default() += 1;
        }
    }

    let weekly_activity = window_start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|date| DailyActivity {
            date,
            created: created_by_day.get(&date).copied().unwrap_or(0),
            completed: completed_by_day.get(&date).copied().unwrap_or(0),
        })
        .collect();

    let projects = projects
        .iter()
        .filter_map(|p| {
            let count = per_project.get(&p.id).copied().unwrap_or(0);
            (count > 0).then(|| ProjectTaskCount {
                project_id: p.id,
                name: p.name.clone(),
                color: p.color.clone(),
                count,
            })
        })
        .collect();

    let total = tasks.len();
    Analytics {
        total,
        completed,
        completion_rate: percentage(completed, total),
        in_progress,
        in_progress_rate: percentage(in_progress, total),
        overdue,
        priority,
        weekly_activity,
        projects,
    }
}
