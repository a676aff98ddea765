//! Client-side task and project store for the task board.
//!
//! [`TaskStore`] holds the session's tasks and projects, synchronizes every
//! mutation through an injected [`TaskApi`], and publishes snapshots over a
//! `watch` channel. Board, calendar and analytics views are derived from the
//! current snapshot with the pure functions in `taskboard_core`.

pub mod error;
pub mod notify;
pub mod search;
pub mod store;
pub mod transport;

pub use error::{ClientError, ClientResult};
pub use notify::{NotificationLevel, Notifier, TracingNotifier};
pub use search::{debounce_search, DEFAULT_SEARCH_DEBOUNCE};
pub use store::{StoreSnapshot, TaskStore};
pub use transport::{HttpTaskApi, TaskApi};
