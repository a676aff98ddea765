//! Transient user-facing notifications ("toasts").

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Sink for transient notifications raised by store operations.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);
}

/// Notifier that writes to the tracing subscriber. Used when no UI sink is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Success => tracing::info!(%message, "notification"),
            NotificationLevel::Error => tracing::warn!(%message, "notification"),
        }
    }
}
