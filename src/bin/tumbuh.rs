use anyhow::{Context, Result};
use chrono::Local;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tumbuh::cli::{format_item, print_help};
use tumbuh::config::Config;
use tumbuh::context::{AppContext, StandardContext};
use tumbuh::inbox::Inbox;
use tumbuh::knowledge;
use tumbuh::model::Priority;
use tumbuh::storage::load_tasks;
use tumbuh::system::{ReminderMessage, ReminderService, spawn_reminder_actor};

const BINARY_NAME: &str = "tumbuh";

#[tokio::main]
async fn main() -> Result<()> {
    let mut root: Option<PathBuf> = None;
    let mut verbose = false;
    let mut rest = Vec::new();
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                let path = iter.next().context("--root requires a path")?;
                root = Some(PathBuf::from(path));
            }
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_help(BINARY_NAME);
                return Ok(());
            }
            _ => rest.push(arg),
        }
    }
    init_logging(verbose);

    let ctx = StandardContext::new(root);
    let config = Config::load_or_default(&ctx)?;

    let Some((command, params)) = rest.split_first() else {
        print_help(BINARY_NAME);
        return Ok(());
    };

    match command.as_str() {
        "check" => check(&ctx, config),
        "watch" => watch(&ctx, config).await,
        "ask" => ask(params, &config).await,
        "list" => list(&ctx, params.iter().any(|p| p == "--all")),
        "read" => {
            let id = params.first().context("read requires a notification id")?;
            let store = ctx.store()?;
            if Inbox::modify(&store, |inbox| inbox.mark_read(id))? {
                println!("Marked {} as read", id);
            } else {
                println!("No notification with id {}", id);
            }
            Ok(())
        }
        "read-all" => {
            let store = ctx.store()?;
            let changed = Inbox::modify(&store, |inbox| inbox.mark_all_read())?;
            println!("Marked {} notification(s) as read", changed);
            Ok(())
        }
        "clear" => {
            let store = ctx.store()?;
            Inbox::modify(&store, |inbox| inbox.clear())?;
            println!("Notifications cleared");
            Ok(())
        }
        "thresholds" => {
            for priority in Priority::iter() {
                println!(
                    "{:>8}: {} min",
                    priority.to_string(),
                    config.thresholds.lead_minutes(priority)
                );
            }
            Ok(())
        }
        "help" => {
            print_help(BINARY_NAME);
            Ok(())
        }
        other => {
            eprintln!("Unknown command '{}'", other);
            print_help(BINARY_NAME);
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("tumbuh")
        .build();
    let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn check(ctx: &dyn AppContext, config: Config) -> Result<()> {
    let tasks = load_tasks(&ctx.get_tasks_path()?)?;
    let mut service = ReminderService::new(ctx.store()?, config);
    let fresh = service.check(&tasks, &Local::now())?;

    if fresh.is_empty() {
        println!("Nothing new ({} task(s) checked)", tasks.len());
    }
    for item in &fresh {
        println!("{}", format_item(item));
    }
    Ok(())
}

async fn watch(ctx: &dyn AppContext, config: Config) -> Result<()> {
    let tasks_path = ctx.get_tasks_path()?;
    let poll = Duration::from_secs(config.poll_interval_secs.max(1));
    let (ui_tx, mut ui_rx) = mpsc::channel(32);
    let service = ReminderService::new(ctx.store()?, config);
    let task_tx = spawn_reminder_actor(service, Some(ui_tx));

    log::info!("Watching {}", tasks_path.display());
    let mut last_sent = None;

    loop {
        match load_tasks(&tasks_path) {
            Ok(tasks) if last_sent.as_ref() != Some(&tasks) => {
                task_tx.send(tasks.clone()).await?;
                last_sent = Some(tasks);
            }
            Ok(_) => {}
            Err(e) => log::warn!("Could not reload tasks: {:#}", e),
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(ReminderMessage::Notify(item)) = ui_rx.recv() => {
                println!("{}", format_item(&item));
            }
            _ = sleep(poll) => {}
        }
    }

    Ok(())
}

async fn ask(params: &[String], config: &Config) -> Result<()> {
    let query = params.join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("ask requires a question");
    }
    sleep(Duration::from_millis(config.assistant_delay_ms)).await;
    println!("{}", knowledge::respond(&query));
    Ok(())
}

fn list(ctx: &dyn AppContext, all: bool) -> Result<()> {
    let store = ctx.store()?;
    let inbox = Inbox::try_load(&store)?;
    let shown: Vec<_> = inbox
        .sorted_newest_first()
        .into_iter()
        .filter(|n| all || !n.read)
        .collect();

    if shown.is_empty() {
        println!("No notifications");
    }
    for item in shown {
        println!("{}", format_item(item));
    }
    println!("{} unread", inbox.unread_count());
    Ok(())
}
