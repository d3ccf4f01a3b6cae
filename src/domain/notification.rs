use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Opaque identifier of a live notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome a notification reports. Drives the overlay styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

/// A transient advisory message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    message: String,
    kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            kind,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }
}
