// File: ./src/cli.rs
//! Shared command-line helpers: help text and notification formatting.
use crate::model::NotificationItem;
use chrono::Local;

pub fn print_help(binary_name: &str) {
    println!(
        "Tumbuh v{} - Task reminders and parenting assistant",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [-v] <command>", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    check                 Evaluate tasks.json once and store new notifications");
    println!("    watch                 Keep checking every poll interval until Ctrl-C");
    println!("    ask <question...>     Ask the parenting assistant");
    println!("    list [--all]          Show unread notifications (or all of them)");
    println!("    read <id>             Mark one notification as read");
    println!("    read-all              Mark every notification as read");
    println!("    clear                 Delete all notifications");
    println!("    thresholds            Show reminder lead times per priority");
    println!("    help                  Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Debug logging on stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} ask \"MPASI 6 bulan\"", binary_name);
    println!("    {} ask aktivitas montessori", binary_name);
    println!("    {} list --all", binary_name);
}

/// One line per notification, local time first.
pub fn format_item(item: &NotificationItem) -> String {
    format!(
        "{} {} [{}] {}: {} ({})",
        if item.read { " " } else { "*" },
        item.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        item.kind,
        item.title,
        item.message,
        item.id
    )
}
