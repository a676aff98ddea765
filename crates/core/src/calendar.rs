//! Calendar view: tasks bucketed by the local day of their due date.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskPriority};
use crate::types::Timestamp;

/// Local calendar day of a UTC timestamp in `tz`.
pub fn local_day<Tz: TimeZone>(ts: &Timestamp, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// Per-day indicator data for a calendar cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub count: usize,
    /// Highest priority present that day.
    pub top_priority: Option<TaskPriority>,
}

/// Tasks grouped by due day. Tasks without a due date are left out.
#[derive(Debug, Clone, Default)]
pub struct CalendarIndex {
    days: BTreeMap<NaiveDate, Vec<Task>>,
}

impl CalendarIndex {
    pub fn build<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            if let Some(due) = &task.due_date {
                days.entry(local_day(due, tz)).or_default().push(task.clone());
            }
        }
        Self { days }
    }

    pub fn tasks_on(&self, date: NaiveDate) -> &[Task] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// The selected day's tasks narrowed by a case-insensitive title query.
    pub fn visible_tasks(&self, date: NaiveDate, query: &str) -> Vec<&Task> {
        self.tasks_on(date)
            .iter()
            .filter(|t| t.title_matches(query))
            .collect()
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        let tasks = self.tasks_on(date);
        DaySummary {
            count: tasks.len(),
            top_priority: tasks.iter().map(|t| t.priority).max(),
        }
    }

    /// Days that have at least one task, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Task])> {
        self.days.iter().map(|(d, tasks)| (*d, tasks.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::{FixedOffset, Utc};

    fn task(id: i64, title: &str, due: Option<Timestamp>, priority: TaskPriority) -> Task {
        let ts = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        Task {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority,
            due_date: due,
            tags: vec![],
            project_id: None,
            project: None,
            user_id: 1,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bucket_ignores_time_of_day() {
        let tasks = vec![
            task(1, "Morning", Some(Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap()), TaskPriority::Low),
            task(2, "Late", Some(Utc.with_ymd_and_hms(2024, 7, 15, 23, 59, 0).unwrap()), TaskPriority::Low),
            task(3, "Undated", None, TaskPriority::High),
        ];
        let index = CalendarIndex::build(&tasks, &Utc);
        let ids: Vec<i64> = index.tasks_on(day(2024, 7, 15)).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(index.days().count(), 1);
    }

    #[test]
    fn bucket_uses_local_day() {
        let due = Utc.with_ymd_and_hms(2024, 7, 15, 23, 30, 0).unwrap();
        let tasks = vec![task(1, "Late", Some(due), TaskPriority::Low)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let index = CalendarIndex::build(&tasks, &plus_two);
        assert!(index.tasks_on(day(2024, 7, 15)).is_empty());
        assert_eq!(index.tasks_on(day(2024, 7, 16)).len(), 1);
    }

    #[test]
    fn visible_tasks_filter_by_title() {
        let due = Some(Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap());
        let tasks = vec![
            task(1, "Call Alice", due, TaskPriority::Low),
            task(2, "Email Bob", due, TaskPriority::Low),
        ];
        let index = CalendarIndex::build(&tasks, &Utc);
        let visible = index.visible_tasks(day(2024, 7, 15), "ALICE");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
        assert_eq!(index.visible_tasks(day(2024, 7, 15), "").len(), 2);
    }

    #[test]
    fn summary_reports_count_and_highest_priority() {
        let due = Some(Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap());
        let tasks = vec![
            task(1, "a", due, TaskPriority::Low),
            task(2, "b", due, TaskPriority::High),
            task(3, "c", due, TaskPriority::Medium),
        ];
        let index = CalendarIndex::build(&tasks, &Utc);
        assert_eq!(
            index.day_summary(day(2024, 7, 15)),
            DaySummary {
                count: 3,
                top_priority: Some(TaskPriority::High),
            }
        );
        assert_eq!(index.day_summary(day(2024, 7, 16)), DaySummary::default());
    }
}
