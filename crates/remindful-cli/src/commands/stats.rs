//! Progress and achievement commands.

use clap::Subcommand;
use remindful_core::{analytics, ReminderRepo, Store, ACHIEVEMENTS};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Summary of reminders and progress
    Show {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List achievements and their unlock state
    Achievements,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);
    let user = repo.current_user()?;

    match action {
        StatsAction::Show { json } => {
            let reminders = repo.list()?;
            let summary = analytics::summarize(&reminders, &user.stats, &user.achievements);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Level {}  ({} points)", summary.stats.level, summary.stats.points);
                println!("Streak: {} days", summary.stats.streak);
                println!(
                    "Reminders: {} total, {} completed, {} pending ({}%)",
                    summary.total, summary.completed, summary.pending, summary.completion_rate
                );
                println!(
                    "By type: {} medicine, {} task, {} exercise",
                    summary.by_kind.medicine, summary.by_kind.task, summary.by_kind.exercise
                );
                println!(
                    "By priority: {} high, {} medium, {} low",
                    summary.by_priority.high, summary.by_priority.medium, summary.by_priority.low
                );
            }
        }
        StatsAction::Achievements => {
            for achievement in &ACHIEVEMENTS {
                let unlocked = user
                    .achievements
                    .iter()
                    .find(|a| a.id == achievement.id);
                match unlocked {
                    Some(record) => println!(
                        "{} {} - unlocked {}",
                        achievement.icon,
                        achievement.name,
                        record.unlocked_at.format("%Y-%m-%d")
                    ),
                    None => println!(
                        "{} {} - {}",
                        achievement.icon, achievement.name, achievement.description
                    ),
                }
            }
        }
    }

    Ok(())
}
