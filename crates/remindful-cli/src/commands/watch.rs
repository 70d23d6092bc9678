//! Foreground reminder loop.
//!
//! Drives `Scheduler::tick` on a fixed interval while accepting line
//! commands on stdin. Snoozes live inside this process and end with it.
//!
//! Commands: `done <id>`, `snooze <id> [minutes]`, `water`, `quit`.

use std::time::Duration;

use chrono::{Local, Utc};
use remindful_core::{
    gamification, Announcer, Config, Notifier, Reminder, ReminderRepo, Scheduler, Store,
    ToneEmitter,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::reminder::print_events;

const DEFAULT_SNOOZE_MINUTES: i64 = 5;

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&mut self, reminder: &Reminder) {
        println!(
            "🔔 [{}] {} ({}, {})",
            reminder.id,
            reminder.name,
            reminder.kind.as_str(),
            reminder.priority.as_str()
        );
    }
}

struct ConsoleAnnouncer {
    enabled: bool,
}

impl Announcer for ConsoleAnnouncer {
    fn speak(&mut self, text: &str) {
        if self.enabled {
            println!("🗣  {text}");
        }
    }
}

struct ConsoleTone {
    enabled: bool,
}

impl ToneEmitter for ConsoleTone {
    fn play(&mut self, sound_profile: &str, volume: u32) {
        if self.enabled {
            println!("♪  ({sound_profile} @ {volume})");
        }
    }
}

pub fn run(tick_override: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load_or_default();
    let tick_secs = tick_override.unwrap_or(config.scheduler.tick_secs);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop(tick_secs, config))
}

async fn watch_loop(tick_secs: u64, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);
    // Fails early when nobody is logged in.
    let user = repo.current_user()?;
    info!(username = %user.username, tick_secs, "watching reminders");
    println!("Watching reminders for {}. Commands: done <id>, snooze <id> [min], water, quit", user.username);

    let mut scheduler = Scheduler::new();
    let mut notifier = ConsoleNotifier;
    let mut announcer = ConsoleAnnouncer {
        enabled: config.announcer.speech_enabled,
    };
    let mut tone = ConsoleTone {
        enabled: config.announcer.tone_enabled,
    };

    let mut interval = tokio::time::interval(Duration::from_secs(tick_secs));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // Minutes since the last water prompt, advanced per tick.
    let mut water_elapsed = Duration::ZERO;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Local::now();
                let reminders = repo.list()?;
                let user = repo.current_user()?;
                let fired = scheduler.tick(
                    now,
                    &reminders,
                    &user.settings,
                    &mut notifier,
                    &mut announcer,
                    &mut tone,
                );
                for event in &fired {
                    info!(reminder_id = event.reminder_id, name = %event.name, "fired");
                }

                water_elapsed += Duration::from_secs(tick_secs);
                let interval_minutes = user.settings.water_reminder_interval as u64;
                if user.settings.water_reminder_enabled
                    && interval_minutes > 0
                    && water_elapsed >= Duration::from_secs(interval_minutes * 60)
                {
                    water_elapsed = Duration::ZERO;
                    announcer.speak("Time to drink some water");
                    println!(
                        "💧 Water check: {}/{}",
                        user.stats.water_intake, user.stats.water_goal
                    );
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(input) => {
                        if !handle_command(input.trim(), &repo, &mut scheduler) {
                            break;
                        }
                    }
                    // stdin closed
                    None => break,
                }
            }
        }
    }

    info!("watch loop stopped");
    Ok(())
}

/// Returns false when the loop should stop.
fn handle_command(input: &str, repo: &ReminderRepo, scheduler: &mut Scheduler) -> bool {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("quit") | Some("exit") => return false,
        Some("done") => {
            let Some(id) = parts.next().and_then(|s| s.parse().ok()) else {
                println!("usage: done <id>");
                return true;
            };
            match repo.toggle(id) {
                Ok(reminder) if reminder.completed => {
                    scheduler.note_completion(id, Local::now().date_naive());
                    match repo.current_user() {
                        Ok(mut user) => {
                            let events = gamification::complete_reminder(
                                &mut user,
                                reminder.priority,
                                Utc::now(),
                            );
                            if let Err(e) = repo.persist_user(&user) {
                                warn!(error = %e, "failed to persist stats");
                            }
                            println!("Completed: {}", reminder.name);
                            print_events(&events);
                        }
                        Err(e) => warn!(error = %e, "failed to load user"),
                    }
                }
                Ok(reminder) => println!("Reopened: {}", reminder.name),
                Err(e) => println!("error: {e}"),
            }
        }
        Some("snooze") => {
            let Some(id) = parts.next().and_then(|s| s.parse().ok()) else {
                println!("usage: snooze <id> [minutes]");
                return true;
            };
            let minutes = parts
                .next()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SNOOZE_MINUTES);
            scheduler.snooze(id, minutes, Local::now());
            println!("Snoozed {id} for {minutes} minutes");
        }
        Some("water") => match repo.current_user() {
            Ok(mut user) => {
                let events = gamification::add_water(&mut user, Utc::now());
                if let Err(e) = repo.persist_user(&user) {
                    warn!(error = %e, "failed to persist water intake");
                }
                println!(
                    "Water: {}/{}",
                    user.stats.water_intake, user.stats.water_goal
                );
                print_events(&events);
            }
            Err(e) => println!("error: {e}"),
        },
        Some(other) => println!("unknown command: {other}"),
        None => {}
    }
    true
}
