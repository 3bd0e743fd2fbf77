//! # Notifications
//!
//! The toast seam. Commands and the settlement workflow describe what
//! happened; whoever hosts the register decides how to show it.
//!
//! ```text
//!   create_table ──► "Table Created"     (Info)
//!   pay_bill OK  ──► "Payment Complete"  (Success)
//!   pay_bill ERR ──► "Payment Failed"    (Failure)
//! ```

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn table_created(name: &str, table_id: &str) -> Self {
        Notification::new(
            NotificationKind::Info,
            "Table Created",
            format!("{} ({}) is now open.", name, table_id),
        )
    }

    pub fn payment_complete(method: &str, currency: &str, email: Option<&str>) -> Self {
        let receipt = email
            .map(|email| format!(" Receipt will be sent to {}.", email))
            .unwrap_or_default();

        Notification::new(
            NotificationKind::Success,
            "Payment Complete",
            format!(
                "Table closed successfully with {} payment in {}.{}",
                method, currency, receipt
            ),
        )
    }

    pub fn payment_failed(message: Option<&str>) -> Self {
        let description = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Failed to register payment");

        Notification::new(NotificationKind::Failure, "Payment Failed", description)
    }
}

/// Receives user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Failure => {
                warn!(title = %notification.title, "{}", notification.description)
            }
            NotificationKind::Success | NotificationKind::Info => {
                info!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}

/// Keeps every notification for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    seen: std::sync::Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_created_text() {
        let n = Notification::table_created("Patio 2", "ord_abc");
        assert_eq!(n.title, "Table Created");
        assert_eq!(n.description, "Patio 2 (ord_abc) is now open.");
    }

    #[test]
    fn test_payment_complete_text() {
        let n = Notification::payment_complete("credit", "USD", None);
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(
            n.description,
            "Table closed successfully with credit payment in USD."
        );

        let n = Notification::payment_complete("cash", "MXN", Some("guest@example.com"));
        assert_eq!(
            n.description,
            "Table closed successfully with cash payment in MXN. Receipt will be sent to guest@example.com."
        );
    }

    #[test]
    fn test_payment_failed_text() {
        assert_eq!(
            Notification::payment_failed(Some("Card declined")).description,
            "Card declined"
        );
        assert_eq!(
            Notification::payment_failed(None).description,
            "Failed to register payment"
        );
        assert_eq!(
            Notification::payment_failed(Some("")).description,
            "Failed to register payment"
        );
    }
}
