//! Reminder management commands.

use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use remindful_core::{
    gamification, GameEvent, NewReminder, Priority, ReminderFilter, ReminderKind, ReminderPatch,
    ReminderRepo, StatusFilter, Store,
};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Create a reminder
    Add {
        /// Reminder name
        name: String,
        /// Firing time, 24-hour HH:MM
        time: String,
        /// Date (YYYY-MM-DD); omit for daily reminders
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Fire every day
        #[arg(long)]
        daily: bool,
        /// Category: medicine, task, or exercise (default: medicine)
        #[arg(long, default_value = "medicine")]
        kind: String,
        /// Priority: high, medium, or low (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List reminders
    List {
        /// Filter by category
        #[arg(long)]
        kind: Option<String>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<String>,
        /// Only completed reminders
        #[arg(long, conflicts_with = "pending")]
        completed: bool,
        /// Only pending reminders
        #[arg(long)]
        pending: bool,
        /// Name substring search
        #[arg(long)]
        search: Option<String>,
    },
    /// Toggle completion
    Toggle {
        /// Reminder ID
        id: i64,
    },
    /// Update a reminder
    Update {
        /// Reminder ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// New firing time, 24-hour HH:MM
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        daily: Option<bool>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a reminder
    Delete {
        /// Reminder ID
        id: i64,
    },
    /// Delete all reminders
    Clear,
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);

    match action {
        ReminderAction::Add {
            name,
            time,
            date,
            daily,
            kind,
            priority,
            notes,
        } => {
            let id = repo.create(&NewReminder {
                name,
                time,
                date,
                is_daily: daily,
                kind: ReminderKind::parse(&kind),
                priority: Priority::parse(&priority),
                notes,
            })?;
            println!("Reminder created: {id}");
        }
        ReminderAction::List {
            kind,
            priority,
            completed,
            pending,
            search,
        } => {
            let filter = ReminderFilter {
                kind: kind.as_deref().map(ReminderKind::parse),
                priority: priority.as_deref().map(Priority::parse),
                status: if completed {
                    Some(StatusFilter::Completed)
                } else if pending {
                    Some(StatusFilter::Pending)
                } else {
                    None
                },
                window: None,
                search,
            };
            let reminders = repo.list()?;
            let today = Local::now().date_naive();
            for reminder in filter.matching(&reminders, today) {
                let mark = if reminder.completed { "x" } else { " " };
                let when = match reminder.date {
                    _ if reminder.is_daily => "daily".to_string(),
                    Some(date) => date.to_string(),
                    None => "today".to_string(),
                };
                println!(
                    "[{mark}] {:>4}  {}  {:<8}  {:<8}  {:<6}  {}",
                    reminder.id,
                    reminder.time,
                    when,
                    reminder.kind.as_str(),
                    reminder.priority.as_str(),
                    reminder.name
                );
            }
        }
        ReminderAction::Toggle { id } => {
            let reminder = repo.toggle(id)?;
            if reminder.completed {
                let mut user = repo.current_user()?;
                let events = gamification::complete_reminder(&mut user, reminder.priority, Utc::now());
                repo.persist_user(&user)?;
                println!("Completed: {}", reminder.name);
                print_events(&events);
            } else {
                println!("Reopened: {}", reminder.name);
            }
        }
        ReminderAction::Update {
            id,
            name,
            time,
            date,
            daily,
            kind,
            priority,
            notes,
        } => {
            let patch = ReminderPatch {
                name,
                time,
                date: date.map(Some),
                is_daily: daily,
                kind: kind.as_deref().map(ReminderKind::parse),
                priority: priority.as_deref().map(Priority::parse),
                notes,
                completed: None,
                completed_at: None,
            };
            let reminder = repo.update(id, &patch)?;
            println!("{}", serde_json::to_string_pretty(&reminder)?);
        }
        ReminderAction::Delete { id } => {
            repo.delete(id)?;
            println!("Reminder deleted: {id}");
        }
        ReminderAction::Clear => {
            let deleted = repo.delete_all()?;
            println!("Deleted {deleted} reminders");
        }
    }

    Ok(())
}

pub fn print_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PointsAwarded { amount, total } => {
                println!("+{amount} points ({total} total)");
            }
            GameEvent::LevelUp { level } => println!("Level up! Now level {level}"),
            GameEvent::AchievementUnlocked { name, .. } => {
                println!("Achievement unlocked: {name}");
            }
            GameEvent::WaterGoalReached { intake, goal } => {
                println!("Water goal reached ({intake}/{goal})");
            }
        }
    }
}
