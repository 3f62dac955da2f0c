//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use authgate_auth::AccountService;
use authgate_core::config::{AppConfig, UserDirectoryProvider};
use authgate_core::error::AppError;
use authgate_database::{UserDirectory, UserDirectoryManager};
use authgate_entity::user::User;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new user
    Add {
        /// Username
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: i32,
    /// Username
    username: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.database.provider == UserDirectoryProvider::Memory {
        output::print_warning("The memory user directory does not outlive this command.");
    }

    let directory = std::sync::Arc::new(UserDirectoryManager::new(&config.database).await?);

    match &args.command {
        UserCommand::Add { username, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt(format!("Password for '{username}'"))
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let accounts = AccountService::new(directory);
            let user = accounts.register(username, &password).await?;

            output::print_success(&format!("User '{}' created", user.username));
            output::print_item(&UserRow::from(&user), format);
        }
        UserCommand::List => {
            let users = directory.list().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
