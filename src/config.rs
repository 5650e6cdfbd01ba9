// File: ./src/config.rs
// Notification settings: loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::NotificationType;
use crate::reminder::{DEFAULT_SUMMARY_TOLERANCE, ReminderThresholds};
use crate::storage::FileStore;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}
fn default_summary_time() -> String {
    "08:00".to_string()
}
fn default_tolerance() -> u32 {
    DEFAULT_SUMMARY_TOLERANCE
}
fn default_poll_interval() -> u64 {
    60
}
fn default_assistant_delay() -> u64 {
    1000
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Master switch for everything the reminder service emits.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub task_reminders: bool,
    #[serde(default = "default_true")]
    pub overdue_alerts: bool,
    #[serde(default = "default_true")]
    pub daily_summary: bool,
    #[serde(default = "default_true")]
    pub achievements: bool,

    #[serde(default = "default_summary_time")]
    pub daily_summary_time: String, // Format "HH:MM"
    #[serde(default = "default_tolerance")]
    pub summary_tolerance_mins: u32,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_true")]
    pub desktop_notifications: bool,

    /// Artificial "typing" pause before the assistant answer is shown.
    #[serde(default = "default_assistant_delay")]
    pub assistant_delay_ms: u64,

    #[serde(default)]
    pub thresholds: ReminderThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            task_reminders: true,
            overdue_alerts: true,
            daily_summary: true,
            achievements: true,
            daily_summary_time: "08:00".to_string(),
            summary_tolerance_mins: DEFAULT_SUMMARY_TOLERANCE,
            poll_interval_secs: 60,
            desktop_notifications: true,
            assistant_delay_ms: 1000,
            thresholds: ReminderThresholds::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file means defaults. Parse errors still propagate.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        FileStore::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            FileStore::atomic_write(&path, toml_str)?;
            Ok(())
        })
    }

    /// Whether the settings let a notification of `kind` through.
    pub fn allows(&self, kind: NotificationType) -> bool {
        self.enabled
            && match kind {
                NotificationType::TaskReminder => self.task_reminders,
                NotificationType::TaskOverdue => self.overdue_alerts,
                NotificationType::DailySummary => self.daily_summary,
                NotificationType::Achievement => self.achievements,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let ctx = TestContext::new();
        assert!(Config::load(&ctx).is_err());
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let mut config = Config::default();
        config.daily_summary_time = "19:30".to_string();
        config.thresholds.urgent = 10;
        config.save(&ctx).unwrap();

        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded.daily_summary_time, "19:30");
        assert_eq!(loaded.thresholds.urgent, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "overdue_alerts = false\n[thresholds]\nlow = 720\n").unwrap();

        let loaded = Config::load(&ctx).unwrap();
        assert!(!loaded.overdue_alerts);
        assert!(loaded.task_reminders);
        assert_eq!(loaded.thresholds.low, 720);
        assert_eq!(loaded.thresholds.urgent, 15);
        assert_eq!(loaded.poll_interval_secs, 60);
    }

    #[test]
    fn test_master_switch() {
        let config = Config {
            enabled: false,
            ..Config::default()
        };
        assert!(!config.allows(NotificationType::TaskOverdue));
        assert!(Config::default().allows(NotificationType::Achievement));
    }
}
