//! User-facing feedback channel.

use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "{}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Shows informational, warning and error messages to the user.
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn info(&self, message: &str) {
        self.notify(Notification {
            severity: Severity::Info,
            message: message.to_string(),
        });
    }

    fn warn(&self, message: &str) {
        self.notify(Notification {
            severity: Severity::Warning,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            severity: Severity::Error,
            message: message.to_string(),
        });
    }
}

/// Prints notifications to stderr so stdout stays free for payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{notification}");
    }
}

/// Keeps every notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .filter(|notification| notification.severity == severity)
            .map(|notification| notification.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_filters_by_severity() {
        let notifier = RecordingNotifier::new();
        notifier.warn("falling back");
        notifier.info("copied");
        notifier.error("boom");

        assert_eq!(notifier.notifications().len(), 3);
        assert_eq!(notifier.messages(Severity::Info), vec!["copied".to_string()]);
        assert_eq!(notifier.messages(Severity::Error), vec!["boom".to_string()]);
    }

    #[test]
    fn display_prefixes_non_info_messages() {
        let warning = Notification {
            severity: Severity::Warning,
            message: "careful".into(),
        };
        assert_eq!(warning.to_string(), "warning: careful");
    }
}
