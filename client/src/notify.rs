//! User-facing notifications
//!
//! The gateway itself never notifies. [`crate::api::HealthApi`] maps call
//! outcomes to [`Notification`]s and hands them to a [`Notifier`], so the
//! access layer can be exercised without any UI attached.

use std::sync::Mutex;

use tracing::{info, warn};

use crate::error::{ErrorKind, GatewayError};

/// Shown for 500 responses instead of the backend's message
pub const SERVER_ERROR_DESCRIPTION: &str = "Please try again later";

/// Shown when the backend could not be reached at all
pub const NETWORK_ERROR_DESCRIPTION: &str =
    "Unable to connect to the server. Please check your connection.";

/// Whether a failed call should surface a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyPolicy {
    #[default]
    Notify,
    /// Background reads where a failure should not interrupt the user
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A dismissable message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    /// Title/description pair for a failed call
    pub fn from_error(err: &GatewayError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::error("Resource not found", err.message()),
            ErrorKind::InvalidRequest => Self::error("Invalid request", err.message()),
            ErrorKind::Server => Self::error("Server error", SERVER_ERROR_DESCRIPTION),
            ErrorKind::Network => Self::error("Network error", NETWORK_ERROR_DESCRIPTION),
            ErrorKind::RequestFailed | ErrorKind::Unexpected => {
                Self::error("Request failed", err.message())
            }
        }
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or_default();
        match notification.level {
            Level::Success => info!(title = %notification.title, "{}", description),
            Level::Error => warn!(title = %notification.title, "{}", description),
        }
    }
}

/// Keeps every notification in memory, in emission order
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Drain and return everything received so far
    pub fn take(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|mut entries| std::mem::take(&mut *entries))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_notifications() {
        let not_found = GatewayError::from_status(StatusCode::NOT_FOUND, "User not found".into());
        assert_eq!(
            Notification::from_error(&not_found),
            Notification::error("Resource not found", "User not found")
        );

        let invalid = GatewayError::from_status(StatusCode::BAD_REQUEST, "email already used".into());
        assert_eq!(
            Notification::from_error(&invalid),
            Notification::error("Invalid request", "email already used")
        );

        let conflict = GatewayError::from_status(StatusCode::CONFLICT, "Conflict".into());
        assert_eq!(
            Notification::from_error(&conflict),
            Notification::error("Request failed", "Conflict")
        );
    }

    #[test]
    fn test_server_error_hides_message() {
        let err = GatewayError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "NullPointerException".into());
        let notification = Notification::from_error(&err);
        assert_eq!(notification.title, "Server error");
        assert_eq!(notification.description.as_deref(), Some(SERVER_ERROR_DESCRIPTION));
        // the error itself still carries the backend text
        assert_eq!(err.to_string(), "NullPointerException");
    }

    #[test]
    fn test_memory_notifier_take_drains() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::success("User created successfully!"));
        assert_eq!(notifier.snapshot().len(), 1);
        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.snapshot().is_empty());
    }

    #[test]
    fn test_tracing_notifier_accepts_both_levels() {
        let notifier = TracingNotifier;
        notifier.notify(Notification::success("Added 1000 steps!"));
        notifier.notify(Notification::error("Network error", NETWORK_ERROR_DESCRIPTION));
    }
}
