//! CSV export.

use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use remindful_core::{Reminder, ReminderRepo, Store};

#[derive(Subcommand)]
pub enum ExportAction {
    /// Export the current user's reminders as CSV
    Csv {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn run(action: ExportAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);

    match action {
        ExportAction::Csv { out } => {
            let reminders = repo.list()?;
            let csv = to_csv(&reminders);
            match out {
                Some(path) => {
                    fs::write(&path, csv)?;
                    println!("Exported {} reminders to {}", reminders.len(), path.display());
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}

const HEADER: &str = "Name,Time,Date,Type,Priority,Completed,Daily,Notes";

fn to_csv(reminders: &[Reminder]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for reminder in reminders {
        out.push_str(&csv_row(reminder));
        out.push('\n');
    }
    out
}

fn csv_row(reminder: &Reminder) -> String {
    [
        escape(&reminder.name),
        to_12_hour(&reminder.time),
        reminder.date.map(|d| d.to_string()).unwrap_or_default(),
        reminder.kind.as_str().to_string(),
        reminder.priority.as_str().to_string(),
        if reminder.completed { "Yes" } else { "No" }.to_string(),
        if reminder.is_daily { "Yes" } else { "No" }.to_string(),
        escape(&reminder.notes),
    ]
    .join(",")
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// "08:05" -> "8:05 AM"; input that is not HH:MM passes through unchanged.
fn to_12_hour(time: &str) -> String {
    let Some((h, m)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = h.parse::<u32>() else {
        return time.to_string();
    };
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{display_hour}:{m} {suffix}")
}
