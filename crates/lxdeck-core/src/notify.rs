// ── Notification service ──
//
// A single slot shared by every action. Newest replaces oldest; a
// notification stays until cleared or replaced. Front ends subscribe to
// the slot through a `watch` receiver.

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Positive,
    Caution,
    Negative,
    Information,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    /// Short heading; empty for plain success messages.
    pub title: String,
    pub message: String,
}

pub struct Notifications {
    slot: watch::Sender<Option<Notification>>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    /// Replace whatever is showing.
    pub fn show(&self, notification: Notification) {
        self.slot.send_replace(Some(notification));
    }

    pub fn clear(&self) {
        self.slot.send_replace(None);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notification {
            severity: Severity::Positive,
            title: String::new(),
            message: message.into(),
        });
    }

    /// Publish a failure carrying the error's server-side detail.
    pub fn failure(&self, title: impl Into<String>, error: &CoreError) {
        self.show(Notification {
            severity: Severity::Negative,
            title: title.into(),
            message: error.detail(),
        });
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_replaces_oldest() {
        let notify = Notifications::new();
        notify.success("Instance web-1 stopped.");
        notify.failure(
            "Error on instance stop.",
            &CoreError::OperationFailed {
                message: "Failed shutting down instance".into(),
            },
        );

        let current = notify.current();
        assert_eq!(
            current.as_ref().map(|n| (n.severity, n.message.as_str())),
            Some((Severity::Negative, "Failed shutting down instance"))
        );
    }

    #[test]
    fn clear_empties_the_slot() {
        let notify = Notifications::new();
        notify.success("done");
        notify.clear();
        assert!(notify.current().is_none());
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let notify = Notifications::new();
        let mut rx = notify.subscribe();
        notify.success("Network net0 created.");
        assert!(rx.has_changed().unwrap_or(false));
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.map(|n| n.message), Some("Network net0 created.".into()));
    }
}
