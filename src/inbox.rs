// File: ./src/inbox.rs
// The host-owned notification list.
//
// Items are appended by the reminder service, flipped to read by the UI and
// dropped on explicit clear. State round-trips through a `KeyValueStore` under
// the `notifications` key. Entries this build cannot interpret are carried
// along untouched so a save never drops them.
use crate::model::NotificationItem;
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};

pub const INBOX_KEY: &str = "notifications";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Inbox {
    pub items: Vec<NotificationItem>,
    foreign: Vec<serde_json::Value>,
}

impl Inbox {
    /// Parses a stored list entry by entry. Only a list that is not a JSON
    /// array at all is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(json).context("Notification list is not a JSON array")?;

        let mut inbox = Self::default();
        for value in raw {
            match serde_json::from_value::<NotificationItem>(value.clone()) {
                Ok(item) => inbox.items.push(item),
                Err(e) => {
                    log::warn!("Keeping unrecognised notification entry as-is: {}", e);
                    inbox.foreign.push(value);
                }
            }
        }
        Ok(inbox)
    }

    pub fn to_json(&self) -> Result<String> {
        let mut all = Vec::with_capacity(self.items.len() + self.foreign.len());
        for item in &self.items {
            all.push(serde_json::to_value(item)?);
        }
        all.extend(self.foreign.iter().cloned());
        Ok(serde_json::to_string_pretty(&all)?)
    }

    /// Loads the inbox. A missing entry is an empty inbox; read and parse
    /// failures propagate so callers never save over history they could not see.
    pub fn try_load(store: &dyn KeyValueStore) -> Result<Self> {
        match store
            .read(INBOX_KEY)
            .context("Failed to read notification list")?
        {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store
            .write(INBOX_KEY, &self.to_json()?)
            .context("Failed to persist notification list")
    }

    /// Modify the persisted inbox through a closure, holding the store lock
    /// across load and save. Nothing is written when the inbox is unchanged
    /// or when loading fails.
    pub fn modify<F, T>(store: &dyn KeyValueStore, f: F) -> Result<T>
    where
        F: FnOnce(&mut Inbox) -> T,
    {
        let mut f = Some(f);
        let mut result = None;

        store
            .update(INBOX_KEY, &mut |current| {
                let mut inbox = match current {
                    Some(json) => Self::from_json(&json)?,
                    None => Self::default(),
                };
                let before = inbox.clone();
                let apply = f
                    .take()
                    .ok_or_else(|| anyhow::anyhow!("inbox update ran twice"))?;
                result = Some(apply(&mut inbox));

                if inbox == before {
                    Ok(None)
                } else {
                    Ok(Some(inbox.to_json()?))
                }
            })
            .context("Failed to update notification list")?;

        result.ok_or_else(|| anyhow::anyhow!("inbox update did not run"))
    }

    /// Appends newly emitted items. Existing items are never replaced.
    pub fn merge(&mut self, new_items: Vec<NotificationItem>) {
        self.items.extend(new_items);
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(item) => {
                item.read = true;
                true
            }
            None => false,
        }
    }

    /// Returns how many items changed state.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|n| !n.read) {
            item.read = true;
            changed += 1;
        }
        changed
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Explicit clear from the user: drops unrecognised entries too.
    pub fn clear(&mut self) {
        self.items.clear();
        self.foreign.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn unread(&self) -> impl Iterator<Item = &NotificationItem> {
        self.items.iter().filter(|n| !n.read)
    }

    pub fn foreign_count(&self) -> usize {
        self.foreign.len()
    }

    pub fn sorted_newest_first(&self) -> Vec<&NotificationItem> {
        let mut sorted: Vec<&NotificationItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }
}
