// File: ./src/model/mod.rs
pub mod notification;
pub mod task;

pub use notification::{NotificationItem, NotificationType};
pub use task::{Priority, Task, TaskStatus};
