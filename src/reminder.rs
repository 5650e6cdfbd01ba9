// File: ./src/reminder.rs
// Rule-based reminder evaluation over the host's task list.
//
// Everything here is a pure function of its inputs. The engine never owns the
// notification list: it is handed the existing items for de-duplication and
// returns only what is new. Merging and persistence belong to the caller
// (see `inbox` and `system`).
//
// Two different suppression policies apply:
// - task-reminder: suppressed when one was created for the task within the
//   last REMINDER_COOLDOWN_MINUTES.
// - task-overdue: suppressed while an unread one exists for the task.

use crate::model::{NotificationItem, NotificationType, Priority, Task};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Lead time used for priorities without a configured threshold.
pub const DEFAULT_LEAD_MINUTES: i64 = 60;
pub const REMINDER_COOLDOWN_MINUTES: i64 = 30;
pub const DEFAULT_SUMMARY_TOLERANCE: u32 = 5;

/// Minutes before `dueDate` at which a reminder may fire, per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderThresholds {
    pub urgent: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for ReminderThresholds {
    fn default() -> Self {
        Self {
            urgent: 15,
            high: 60,
            medium: 240,
            low: 1440,
        }
    }
}

impl ReminderThresholds {
    pub fn lead_minutes(&self, priority: Priority) -> i64 {
        match priority {
            Priority::Urgent => self.urgent as i64,
            Priority::High => self.high as i64,
            Priority::Medium => self.medium as i64,
            Priority::Low => self.low as i64,
            Priority::Unknown => DEFAULT_LEAD_MINUTES,
        }
    }
}

/// Whole minutes from `now` until `due`, floored. Negative once `due` has passed.
pub fn minutes_until(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    (due - now).num_seconds().div_euclid(60)
}

/// Human readable remaining time: minutes below one hour, whole hours otherwise.
pub fn format_remaining(minutes: i64) -> String {
    if minutes < 60 {
        format!("{} menit", minutes)
    } else {
        format!("{} jam", minutes / 60)
    }
}

/// Decides which tasks warrant a new reminder or overdue notification.
///
/// Returns only newly created items; `existing` is never modified. Tasks
/// without a due date and completed tasks are skipped silently.
pub fn evaluate(
    tasks: &[Task],
    now: DateTime<Utc>,
    existing: &[NotificationItem],
    thresholds: &ReminderThresholds,
) -> Vec<NotificationItem> {
    let mut emitted: Vec<NotificationItem> = Vec::new();

    for task in tasks {
        if task.status.is_done() {
            continue;
        }
        let Some(due) = task.due_date else {
            continue;
        };

        let minutes_until_due = minutes_until(now, due);

        if minutes_until_due < 0 {
            let has_unread_overdue = existing
                .iter()
                .chain(emitted.iter())
                .any(|n| n.is_for(NotificationType::TaskOverdue, &task.id) && !n.read);
            if !has_unread_overdue {
                emitted.push(overdue_notification(task, now));
            }
            continue;
        }

        let lead = thresholds.lead_minutes(task.priority);
        if minutes_until_due == 0 || minutes_until_due > lead {
            continue;
        }

        let cooling_down = existing.iter().chain(emitted.iter()).any(|n| {
            n.is_for(NotificationType::TaskReminder, &task.id)
                && (now - n.timestamp).num_minutes() < REMINDER_COOLDOWN_MINUTES
        });
        if !cooling_down {
            emitted.push(reminder_notification(task, minutes_until_due, now));
        }
    }

    emitted
}

fn reminder_notification(task: &Task, minutes_until_due: i64, now: DateTime<Utc>) -> NotificationItem {
    NotificationItem::new(
        NotificationType::TaskReminder,
        "Pengingat Tugas",
        format!(
            "\"{}\" jatuh tempo dalam {}",
            task.title,
            format_remaining(minutes_until_due)
        ),
        Some(&task.id),
        now,
    )
}

fn overdue_notification(task: &Task, now: DateTime<Utc>) -> NotificationItem {
    NotificationItem::new(
        NotificationType::TaskOverdue,
        "Tugas Terlambat",
        format!("\"{}\" sudah melewati tenggat waktu", task.title),
        Some(&task.id),
        now,
    )
}

/// True when `now` is within `tolerance_minutes` of today's `configured` "HH:MM".
///
/// Stateless: the caller is responsible for firing at most once per day.
/// An unparsable time never fires.
pub fn daily_summary_due<Tz: TimeZone>(
    now: &DateTime<Tz>,
    configured: &str,
    tolerance_minutes: u32,
) -> bool {
    let Ok(target) = NaiveTime::parse_from_str(configured.trim(), "%H:%M") else {
        return false;
    };
    let distance = now.time().signed_duration_since(target).num_minutes().abs();
    distance <= tolerance_minutes as i64
}

/// Builds the daily summary for the day `now` falls on (in `now`'s timezone).
pub fn daily_summary<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> NotificationItem {
    let now_utc = now.with_timezone(&Utc);
    let today = now.date_naive();

    let open: Vec<&Task> = tasks.iter().filter(|t| !t.status.is_done()).collect();
    let due_today = open
        .iter()
        .filter_map(|t| t.due_date)
        .filter(|d| d.with_timezone(&now.timezone()).date_naive() == today)
        .count();
    let overdue = open
        .iter()
        .filter_map(|t| t.due_date)
        .filter(|d| *d < now_utc)
        .count();

    NotificationItem::new(
        NotificationType::DailySummary,
        "Ringkasan Harian",
        format!(
            "Hari ini: {} tugas jatuh tempo, {} terlambat, {} belum selesai.",
            due_today,
            overdue,
            open.len()
        ),
        None,
        now_utc,
    )
}

/// One achievement per task that moved to completed between two snapshots.
pub fn achievements(previous: &[Task], current: &[Task], now: DateTime<Utc>) -> Vec<NotificationItem> {
    current
        .iter()
        .filter(|t| t.status.is_done())
        .filter(|t| {
            previous
                .iter()
                .any(|p| p.id == t.id && !p.status.is_done())
        })
        .map(|t| {
            NotificationItem::new(
                NotificationType::Achievement,
                "Tugas Selesai!",
                format!("Hebat! \"{}\" telah diselesaikan.", t.title),
                Some(&t.id),
                now,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_minutes_until_floors() {
        let now = Utc::now();
        assert_eq!(minutes_until(now, now + Duration::seconds(90)), 1);
        assert_eq!(minutes_until(now, now - Duration::seconds(30)), -1);
        assert_eq!(minutes_until(now, now + Duration::seconds(30)), 0);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(45), "45 menit");
        assert_eq!(format_remaining(60), "1 jam");
        assert_eq!(format_remaining(239), "3 jam");
    }

    #[test]
    fn test_unknown_priority_uses_fallback() {
        let t = ReminderThresholds::default();
        assert_eq!(t.lead_minutes(Priority::Unknown), DEFAULT_LEAD_MINUTES);
        assert_eq!(t.lead_minutes(Priority::Low), 1440);
    }

    #[test]
    fn test_partial_threshold_override() {
        let t: ReminderThresholds = toml::from_str("urgent = 5").unwrap();
        assert_eq!(t.urgent, 5);
        assert_eq!(t.high, 60);
        assert_eq!(t.medium, 240);
    }
}
