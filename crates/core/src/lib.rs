//! Domain logic for the task board: wire schemas, status/priority enums,
//! kanban grouping, calendar bucketing and analytics.
//!
//! This crate has no database or HTTP dependencies; all data is passed in by
//! the caller so the server and the client share one canonical task shape.

pub mod analytics;
pub mod board;
pub mod calendar;
pub mod error;
pub mod project;
pub mod task;
pub mod types;
pub mod user;
pub mod validation;
