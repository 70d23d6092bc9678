//! Account management commands.

use clap::Subcommand;
use remindful_core::{AuthGateway, ReminderRepo, Store};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account and log in
    Register {
        username: String,
        email: String,
        /// Password (prefer REMINDFUL_PASSWORD to keep it out of shell history)
        #[arg(long, env = "REMINDFUL_PASSWORD")]
        password: String,
    },
    /// Log in with an existing account
    Login {
        username: String,
        #[arg(long, env = "REMINDFUL_PASSWORD")]
        password: String,
    },
    /// Log out of the current session
    Logout,
    /// Show the logged-in user
    Whoami,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let auth = AuthGateway::new(&store);

    match action {
        AuthAction::Register {
            username,
            email,
            password,
        } => {
            let user_id = auth.register(&username, &email, &password)?;
            println!("Registered {username} (user {user_id})");
        }
        AuthAction::Login { username, password } => {
            let user = auth.login(&username, &password)?;
            println!("Logged in as {} (level {})", user.username, user.stats.level);
        }
        AuthAction::Logout => {
            auth.logout()?;
            println!("Logged out");
        }
        AuthAction::Whoami => {
            let user = ReminderRepo::new(&store).current_user()?;
            println!("{} <{}>", user.username, user.email);
        }
    }

    Ok(())
}
