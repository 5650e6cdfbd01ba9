// File: ./src/system.rs
// Host-side polling loop around the reminder engine.
//
// `ReminderService` holds the state the engine refuses to own: the previous
// task snapshot (for achievements) and the once-per-day guard for the daily
// summary. `spawn_reminder_actor` drives it from a tokio task.
use crate::config::Config;
use crate::inbox::Inbox;
use crate::model::{NotificationItem, NotificationType, Task};
use crate::reminder::{achievements, daily_summary, daily_summary_due, evaluate};
use crate::storage::KeyValueStore;
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use notify_rust::Notification;
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior, interval};

/// Stores the local date ("%Y-%m-%d") of the last emitted daily summary.
pub const LAST_SUMMARY_KEY: &str = "last-daily-summary";

#[derive(Debug, Clone)]
pub enum ReminderMessage {
    Notify(NotificationItem),
}

pub struct ReminderService<S: KeyValueStore> {
    store: S,
    config: Config,
    previous: Vec<Task>,
}

impl<S: KeyValueStore> ReminderService<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            previous: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one evaluation pass and persists whatever it emits.
    /// Returns the newly added notifications.
    ///
    /// The inbox is read, extended and written under one store lock. On any
    /// error nothing is saved and the previous task snapshot is kept, so the
    /// next tick sees the same transitions again.
    pub fn check<Tz: TimeZone>(
        &mut self,
        tasks: &[Task],
        now: &DateTime<Tz>,
    ) -> Result<Vec<NotificationItem>> {
        if !self.config.enabled {
            self.previous = tasks.to_vec();
            return Ok(vec![]);
        }

        let now_utc = now.with_timezone(&Utc);

        let mut summary = None;
        if self.config.allows(NotificationType::DailySummary)
            && daily_summary_due(
                now,
                &self.config.daily_summary_time,
                self.config.summary_tolerance_mins,
            )
        {
            let today = now.date_naive().format("%Y-%m-%d").to_string();
            let last = self.store.read(LAST_SUMMARY_KEY)?;
            if last.as_deref().map(str::trim) != Some(today.as_str()) {
                summary = Some((today, daily_summary(tasks, now)));
            }
        }

        let config = &self.config;
        let previous = &self.previous;
        let summary_item = summary.as_ref().map(|(_, item)| item.clone());

        let (fresh, unread) = Inbox::modify(&self.store, |inbox| {
            let mut fresh: Vec<NotificationItem> =
                evaluate(tasks, now_utc, &inbox.items, &config.thresholds)
                    .into_iter()
                    .filter(|n| config.allows(n.kind))
                    .collect();

            if config.allows(NotificationType::Achievement) {
                fresh.extend(achievements(previous, tasks, now_utc));
            }
            fresh.extend(summary_item);

            inbox.merge(fresh.clone());
            (fresh, inbox.unread_count())
        })?;

        self.previous = tasks.to_vec();

        if let Some((day, _)) = summary {
            self.store.write(LAST_SUMMARY_KEY, &day)?;
        }

        if !fresh.is_empty() {
            log::info!("Emitted {} notification(s), {} unread", fresh.len(), unread);
        }
        Ok(fresh)
    }
}

fn show_desktop_notification(item: &NotificationItem) {
    let summary = item.title.clone();
    let body = item.message.clone();

    std::thread::spawn(move || {
        if let Err(e) = Notification::new()
            .summary(&summary)
            .body(&body)
            .appname("Tumbuh")
            .show()
        {
            log::debug!("Desktop notification failed: {}", e);
        }
    });
}

/// Spawns the background reminder loop.
/// returns: Sender to update the task list.
///
/// A new task list triggers an immediate check; otherwise the loop checks
/// every `poll_interval_secs`. The actor exits once the sender is dropped.
pub fn spawn_reminder_actor<S>(
    mut service: ReminderService<S>,
    ui_sender: Option<mpsc::Sender<ReminderMessage>>,
) -> mpsc::Sender<Vec<Task>>
where
    S: KeyValueStore + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Vec<Task>>(10);

    tokio::spawn(async move {
        let mut tasks: Vec<Task> = Vec::new();
        let mut ticker = interval(Duration::from_secs(
            service.config().poll_interval_secs.max(1),
        ));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; there is nothing to check yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                received = rx.recv() => match received {
                    Some(new_list) => tasks = new_list,
                    None => break,
                },
            }

            let fresh = match service.check(&tasks, &Local::now()) {
                Ok(fresh) => fresh,
                Err(e) => {
                    log::warn!("Reminder check failed: {:#}", e);
                    continue;
                }
            };

            for item in fresh {
                if service.config().desktop_notifications {
                    show_desktop_notification(&item);
                }
                if let Some(ui_tx) = &ui_sender {
                    let _ = ui_tx.send(ReminderMessage::Notify(item)).await;
                }
            }
        }

        log::debug!("Reminder actor stopped");
    });

    tx
}
