//! User-facing notifications.
//!
//! One typed side channel serves both uses from the source system: flash
//! messages attached to the next rendered page, and the notification list
//! returned beside a mutation payload. Exactly one of a success notification
//! or error notifications is emitted per mutation invocation.

use serde::{Deserialize, Serialize};

use crate::domain::messages;

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient success/error message surfaced to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    kind: NotificationKind,
    title: String,
    message: String,
}

impl Notification {
    /// Build a success notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Build a single error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: messages::SOMETHING_WENT_WRONG.to_owned(),
            message: message.into(),
        }
    }

    /// Build one error notification per validation message.
    pub fn from_errors(errors: &[String]) -> Vec<Self> {
        errors.iter().map(Self::error).collect()
    }

    /// Success or error.
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Short heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn error_notifications_map_one_per_message() {
        let errors = vec!["name is blank".to_owned(), "email is invalid".to_owned()];
        let notifications = Notification::from_errors(&errors);
        assert_eq!(notifications.len(), 2);
        assert!(
            notifications
                .iter()
                .all(|n| n.kind() == NotificationKind::Error)
        );
        assert_eq!(notifications[0].message(), "name is blank");
    }
}
