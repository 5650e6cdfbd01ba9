// Tests for the daily summary trigger and the summary/achievement builders.
use chrono::{Duration, FixedOffset, TimeZone, Utc};
use tumbuh::model::{NotificationType, Task, TaskStatus};
use tumbuh::reminder::{achievements, daily_summary, daily_summary_due};

fn wib() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

#[test]
fn test_summary_due_within_tolerance() {
    let now = wib().with_ymd_and_hms(2026, 10, 14, 8, 3, 0).unwrap();
    assert!(daily_summary_due(&now, "08:00", 5));
}

#[test]
fn test_summary_not_due_outside_tolerance() {
    let now = wib().with_ymd_and_hms(2026, 10, 14, 8, 10, 0).unwrap();
    assert!(!daily_summary_due(&now, "08:00", 5));
}

#[test]
fn test_summary_tolerance_applies_before_the_time() {
    let early = wib().with_ymd_and_hms(2026, 10, 14, 7, 56, 0).unwrap();
    assert!(daily_summary_due(&early, "08:00", 5));

    let too_early = wib().with_ymd_and_hms(2026, 10, 14, 7, 54, 0).unwrap();
    assert!(!daily_summary_due(&too_early, "08:00", 5));
}

#[test]
fn test_summary_uses_local_time_of_day() {
    // 08:02 in UTC+7 is 01:02 UTC.
    let now = wib().with_ymd_and_hms(2026, 10, 14, 8, 2, 0).unwrap();
    assert!(daily_summary_due(&now, "08:00", 5));
    assert!(!daily_summary_due(&now.with_timezone(&Utc), "08:00", 5));
}

#[test]
fn test_summary_window_does_not_wrap_past_midnight() {
    let after_midnight = wib().with_ymd_and_hms(2026, 10, 15, 0, 1, 0).unwrap();
    assert!(!daily_summary_due(&after_midnight, "23:58", 5));

    let before = wib().with_ymd_and_hms(2026, 10, 14, 23, 59, 0).unwrap();
    assert!(daily_summary_due(&before, "23:58", 5));
}

#[test]
fn test_invalid_summary_time_never_fires() {
    let now = wib().with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
    assert!(!daily_summary_due(&now, "8 pagi", 5));
    assert!(!daily_summary_due(&now, "", 5));
    assert!(!daily_summary_due(&now, "25:00", 5));
}

#[test]
fn test_daily_summary_counts() {
    let now = wib().with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
    let now_utc = now.with_timezone(&Utc);

    let tasks = vec![
        Task::new("1", "Posyandu").with_due(now_utc + Duration::hours(3)),
        Task::new("2", "Vitamin").with_due(now_utc - Duration::hours(30)),
        Task::new("3", "Belanja").with_due(now_utc + Duration::days(3)),
        Task::new("4", "Selesai")
            .with_due(now_utc + Duration::hours(1))
            .with_status(TaskStatus::Completed),
        Task::new("5", "Tanpa tanggal"),
    ];

    let item = daily_summary(&tasks, &now);
    assert_eq!(item.kind, NotificationType::DailySummary);
    assert!(item.task_id.is_none());
    assert_eq!(
        item.message,
        "Hari ini: 1 tugas jatuh tempo, 1 terlambat, 4 belum selesai."
    );
}

#[test]
fn test_achievement_only_on_transition() {
    let now = Utc::now();
    let previous = vec![
        Task::new("a", "Mandi"),
        Task::new("b", "Makan").with_status(TaskStatus::Completed),
    ];
    let current = vec![
        Task::new("a", "Mandi").with_status(TaskStatus::Completed),
        Task::new("b", "Makan").with_status(TaskStatus::Completed),
        Task::new("c", "Baru").with_status(TaskStatus::Completed),
    ];

    let out = achievements(&previous, &current, now);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].kind, NotificationType::Achievement);
    assert_eq!(out[0].task_id.as_deref(), Some("a"));
}
