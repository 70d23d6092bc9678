//! Per-user settings commands.

use clap::Subcommand;
use remindful_core::{ReminderRepo, SettingsPatch, Store};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Get,
    /// Update settings; unset flags keep their current value
    Set {
        #[arg(long)]
        theme: Option<String>,
        /// small, medium, or large
        #[arg(long)]
        font_size: Option<String>,
        #[arg(long)]
        high_contrast: Option<bool>,
        /// Sound profile name, or "none" to silence alerts
        #[arg(long)]
        notification_sound: Option<String>,
        /// 0 to 100
        #[arg(long)]
        notification_volume: Option<u32>,
        #[arg(long)]
        email_notifications: Option<bool>,
        #[arg(long)]
        sms_notifications: Option<bool>,
        #[arg(long)]
        water_reminder: Option<bool>,
        /// Water reminder interval in minutes
        #[arg(long)]
        water_interval: Option<u32>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let repo = ReminderRepo::new(&store);

    match action {
        SettingsAction::Get => {
            let user = repo.current_user()?;
            println!("{}", serde_json::to_string_pretty(&user.settings)?);
        }
        SettingsAction::Set {
            theme,
            font_size,
            high_contrast,
            notification_sound,
            notification_volume,
            email_notifications,
            sms_notifications,
            water_reminder,
            water_interval,
        } => {
            let patch = SettingsPatch {
                theme,
                font_size,
                high_contrast,
                notification_sound,
                notification_volume,
                email_notifications,
                sms_notifications,
                water_reminder_enabled: water_reminder,
                water_reminder_interval: water_interval,
            };
            let user = repo.update_settings(&patch)?;
            println!("{}", serde_json::to_string_pretty(&user.settings)?);
        }
    }

    Ok(())
}
