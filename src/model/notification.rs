// File: ./src/model/notification.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    TaskReminder,
    TaskOverdue,
    DailySummary,
    Achievement,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::TaskReminder => write!(f, "task-reminder"),
            NotificationType::TaskOverdue => write!(f, "task-overdue"),
            NotificationType::DailySummary => write!(f, "daily-summary"),
            NotificationType::Achievement => write!(f, "achievement"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Back-reference to the originating task. Lookup only.
    #[serde(default)]
    pub task_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl NotificationItem {
    pub fn new(
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        task_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            message: message.into(),
            kind,
            task_id: task_id.map(str::to_string),
            timestamp: now,
            read: false,
        }
    }

    pub fn is_for(&self, kind: NotificationType, task_id: &str) -> bool {
        self.kind == kind && self.task_id.as_deref() == Some(task_id)
    }
}
