//! Water intake commands.

use chrono::Utc;
use clap::Subcommand;
use remindful_core::{gamification, ReminderRepo, Store};

use super::reminder::print_events;

#[derive(Subcommand)]
pub enum WaterAction {
    /// Log a glass of water
    Add,
    /// Remove one glass
    Remove,
    /// Show today's intake
    Status,
}

pub fn run(action: WaterAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);
    let mut user = repo.current_user()?;

    match action {
        WaterAction::Add => {
            let events = gamification::add_water(&mut user, Utc::now());
            repo.persist_user(&user)?;
            println!(
                "Water: {}/{}",
                user.stats.water_intake, user.stats.water_goal
            );
            print_events(&events);
        }
        WaterAction::Remove => {
            gamification::remove_water(&mut user.stats);
            repo.persist_user(&user)?;
            println!(
                "Water: {}/{}",
                user.stats.water_intake, user.stats.water_goal
            );
        }
        WaterAction::Status => {
            let stats = &user.stats;
            println!("Water: {}/{}", stats.water_intake, stats.water_goal);
            println!("Goal days: {}", stats.water_days);
        }
    }

    Ok(())
}
