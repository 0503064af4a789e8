// In crates/events/src/notification.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message emitted after a mutation settles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp: Utc::now(),
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Fire-and-forget destination for notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Broadcasts to every live subscriber. Having no subscribers is not an error.
impl NotificationSink for broadcast::Sender<Notification> {
    fn notify(&self, notification: Notification) {
        let _ = self.send(notification);
    }
}

/// Writes notifications to the log instead of a UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => {
                tracing::error!(title = %notification.title, "{}", notification.message)
            }
            Severity::Warning => {
                tracing::warn!(title = %notification.title, "{}", notification.message)
            }
            Severity::Info | Severity::Success => {
                tracing::info!(title = %notification.title, "{}", notification.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_sink_delivers_to_subscribers() {
        let (tx, mut rx) = broadcast::channel::<Notification>(8);
        tx.notify(Notification::new("Item sold", "Braton sold", Severity::Success));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.title, "Item sold");
        assert_eq!(received.severity, Severity::Success);
    }

    #[test]
    fn broadcast_sink_without_subscribers_is_silent() {
        let (tx, rx) = broadcast::channel::<Notification>(8);
        drop(rx);
        tx.notify(Notification::new("t", "m", Severity::Info));
    }
}
