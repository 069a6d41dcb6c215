use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// What the user should be told once a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Page to send the user to, only ever set on success
    pub redirect: Option<String>,
}

impl Notification {
    pub fn success(message: impl Into<String>, redirect: Option<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            redirect,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            redirect: None,
        }
    }
}

/// Non-blocking sink for submission feedback.
///
/// Implementations must return promptly; they run on the request task.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes every notification to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(
                redirect = notification.redirect.as_deref().unwrap_or("-"),
                "{}",
                notification.message
            ),
            NotificationLevel::Error => tracing::warn!("{}", notification.message),
        }
    }
}
