use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "remindful-cli", version, about = "Remindful CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Reminder management
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Water intake tracking
    Water {
        #[command(subcommand)]
        action: commands::water::WaterAction,
    },
    /// Progress and achievements
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Per-user settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Saved filter presets
    Filter {
        #[command(subcommand)]
        action: commands::filter::FilterAction,
    },
    /// Export reminders
    Export {
        #[command(subcommand)]
        action: commands::export::ExportAction,
    },
    /// Run the reminder loop in the foreground
    Watch {
        /// Seconds between scheduler ticks
        #[arg(long)]
        tick_secs: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Water { action } => commands::water::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Filter { action } => commands::filter::run(action),
        Commands::Export { action } => commands::export::run(action),
        Commands::Watch { tick_secs } => commands::watch::run(tick_secs),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
