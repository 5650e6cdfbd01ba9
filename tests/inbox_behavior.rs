// Tests for the persisted notification list.
use chrono::{Duration, Utc};
use tumbuh::context::{AppContext, TestContext};
use tumbuh::inbox::Inbox;
use tumbuh::model::{NotificationItem, NotificationType};
use tumbuh::storage::{KeyValueStore, MemoryStore};

fn item(kind: NotificationType, task: Option<&str>, mins_ago: i64) -> NotificationItem {
    NotificationItem::new(
        kind,
        "Judul",
        "Pesan",
        task,
        Utc::now() - Duration::minutes(mins_ago),
    )
}

#[test]
fn test_inbox_persists_through_file_store() {
    let ctx = TestContext::new();
    let store = ctx.store().unwrap();

    let mut inbox = Inbox::try_load(&store).unwrap();
    assert!(inbox.items.is_empty());

    inbox.merge(vec![
        item(NotificationType::TaskReminder, Some("t1"), 5),
        item(NotificationType::DailySummary, None, 1),
    ]);
    inbox.save(&store).unwrap();

    let reloaded = Inbox::try_load(&store).unwrap();
    assert_eq!(reloaded.items, inbox.items);
    assert_eq!(reloaded.unread_count(), 2);
}

#[test]
fn test_mark_read_and_remove() {
    let mut inbox = Inbox::default();
    let a = item(NotificationType::TaskOverdue, Some("t1"), 0);
    let b = item(NotificationType::Achievement, Some("t2"), 0);
    let a_id = a.id.clone();
    inbox.merge(vec![a, b]);

    assert!(inbox.mark_read(&a_id));
    assert!(!inbox.mark_read("missing"));
    assert_eq!(inbox.unread_count(), 1);
    assert_eq!(inbox.mark_all_read(), 1);
    assert_eq!(inbox.mark_all_read(), 0);

    assert!(inbox.remove(&a_id));
    assert!(!inbox.remove(&a_id));
    assert_eq!(inbox.items.len(), 1);

    inbox.clear();
    assert!(inbox.items.is_empty());
}

#[test]
fn test_merge_appends_and_sorts_newest_first() {
    let mut inbox = Inbox::default();
    let old = item(NotificationType::TaskReminder, Some("t1"), 60);
    let new = item(NotificationType::TaskReminder, Some("t1"), 1);
    let new_id = new.id.clone();
    inbox.merge(vec![old]);
    inbox.merge(vec![new]);

    assert_eq!(inbox.items.len(), 2);
    assert_eq!(inbox.sorted_newest_first()[0].id, new_id);
}

#[test]
fn test_corrupt_inbox_is_an_error_and_is_not_overwritten() {
    let store = MemoryStore::new();
    store.write("notifications", "{ not json").unwrap();
    assert!(Inbox::try_load(&store).is_err());

    let result = Inbox::modify(&store, |inbox| {
        inbox.merge(vec![item(NotificationType::DailySummary, None, 0)])
    });
    assert!(result.is_err());
    assert_eq!(
        store.read("notifications").unwrap().as_deref(),
        Some("{ not json")
    );
}

#[test]
fn test_unrecognised_entries_are_kept_on_save() {
    let store = MemoryStore::new();
    let known = item(NotificationType::TaskReminder, Some("t1"), 3);
    let known_id = known.id.clone();
    let seeded = serde_json::json!([
        serde_json::to_value(&known).unwrap(),
        {"id": "sys-1", "type": "system", "title": "x", "message": "y",
         "timestamp": "2026-10-14T06:00:00Z", "read": false}
    ]);
    store.write("notifications", &seeded.to_string()).unwrap();

    let inbox = Inbox::try_load(&store).unwrap();
    assert_eq!(inbox.items.len(), 1);
    assert_eq!(inbox.foreign_count(), 1);

    Inbox::modify(&store, |inbox| {
        inbox.merge(vec![item(NotificationType::Achievement, Some("t2"), 0)])
    })
    .unwrap();

    let stored: Vec<serde_json::Value> =
        serde_json::from_str(&store.read("notifications").unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().any(|v| v["id"] == known_id.as_str()));
    assert!(stored.iter().any(|v| v["type"] == "system"));
}

#[test]
fn test_failed_read_does_not_save() {
    struct Unreadable(MemoryStore);
    impl KeyValueStore for Unreadable {
        fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
            anyhow::bail!("device busy")
        }
        fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.0.write(key, value)
        }
        fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.0.remove(key)
        }
        fn update(
            &self,
            _key: &str,
            _f: &mut dyn FnMut(Option<String>) -> anyhow::Result<Option<String>>,
        ) -> anyhow::Result<()> {
            anyhow::bail!("device busy")
        }
    }

    let store = Unreadable(MemoryStore::new());
    store.0.write("notifications", "[]").unwrap();
    assert!(Inbox::try_load(&store).is_err());
    assert!(Inbox::modify(&store, |inbox| inbox.clear()).is_err());
    assert_eq!(store.0.read("notifications").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_concurrent_modifies_do_not_lose_updates() {
    let ctx = TestContext::new();
    let shared = ctx.store().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = shared.clone();
            std::thread::spawn(move || {
                for _ in 0..5 {
                    Inbox::modify(&store, |inbox| {
                        let task = format!("t{}", i);
                        inbox.merge(vec![item(
                            NotificationType::TaskReminder,
                            Some(task.as_str()),
                            0,
                        )])
                    })
                    .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(Inbox::try_load(&shared).unwrap().items.len(), 40);
}

#[test]
fn test_modify_saves() {
    let store = MemoryStore::new();
    Inbox::modify(&store, |inbox| {
        inbox.merge(vec![item(NotificationType::DailySummary, None, 0)])
    })
    .unwrap();
    let changed = Inbox::modify(&store, |inbox| inbox.mark_all_read()).unwrap();
    assert_eq!(changed, 1);
    assert_eq!(Inbox::try_load(&store).unwrap().unread_count(), 0);
}

#[test]
fn test_wire_format_uses_host_field_names() {
    let n = item(NotificationType::TaskOverdue, Some("t9"), 0);
    let json = serde_json::to_value(&n).unwrap();
    assert_eq!(json["type"], "task-overdue");
    assert_eq!(json["taskId"], "t9");
    assert_eq!(json["read"], false);
}
