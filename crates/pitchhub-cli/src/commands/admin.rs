//! Administrator account commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use pitchhub_auth::{
    ActivationTokenGenerator, JwtEncoder, PasswordHasher, PasswordValidator,
};
use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_database::repositories::UserRepository;
use pitchhub_service::{AccountService, BookingNotifier, LogMailer};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an active administrator
    Create {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
        } => {
            let username = match username {
                Some(u) => u.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin username")
                    .interact_text()
                    .map_err(super::input_error)?,
            };
            let email = match email {
                Some(e) => e.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin email")
                    .interact_text()
                    .map_err(super::input_error)?,
            };
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(super::input_error)?,
            };

            let pool = super::create_db_pool(config).await?;
            let accounts = account_service(config, pool);
            let user = accounts.create_admin(&username, &email, &password).await?;

            output::print_success(&format!(
                "Admin user '{}' created (id: {})",
                user.username, user.id
            ));
        }
    }

    Ok(())
}

fn account_service(config: &AppConfig, pool: sqlx::PgPool) -> AccountService {
    let mailer = Arc::new(LogMailer::new(config.mail.from_address.clone()));
    AccountService::new(
        Arc::new(UserRepository::new(pool)),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
        Arc::new(ActivationTokenGenerator::new(&config.auth)),
        Arc::new(JwtEncoder::new(&config.auth)),
        Arc::new(BookingNotifier::new(mailer, config.mail.clone())),
    )
}
