//! Saved filter preset commands.

use clap::Subcommand;
use remindful_core::{
    DateWindow, Priority, ReminderFilter, ReminderKind, ReminderRepo, SavedFilter, StatusFilter,
    Store,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum FilterAction {
    /// Save a filter preset
    Save {
        /// Preset name
        name: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// completed or pending
        #[arg(long)]
        status: Option<String>,
        /// today or past-week
        #[arg(long)]
        window: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List saved presets
    List,
}

pub fn run(action: FilterAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);

    match action {
        FilterAction::Save {
            name,
            kind,
            priority,
            status,
            window,
            search,
        } => {
            let preset = SavedFilter {
                id: Uuid::new_v4().to_string(),
                name,
                filter: ReminderFilter {
                    kind: kind.as_deref().map(ReminderKind::parse),
                    priority: priority.as_deref().map(Priority::parse),
                    status: match status.as_deref() {
                        Some("completed") => Some(StatusFilter::Completed),
                        Some("pending") => Some(StatusFilter::Pending),
                        _ => None,
                    },
                    window: match window.as_deref() {
                        Some("today") => Some(DateWindow::Today),
                        Some("past-week") => Some(DateWindow::PastWeek),
                        _ => None,
                    },
                    search,
                },
            };
            repo.save_filter(&preset)?;
            println!("Filter saved: {} ({})", preset.name, preset.id);
        }
        FilterAction::List => {
            let user = repo.current_user()?;
            for preset in &user.saved_filters {
                println!(
                    "{}  {}  {}",
                    preset.id,
                    preset.name,
                    serde_json::to_string(&preset.filter)?
                );
            }
        }
    }

    Ok(())
}
