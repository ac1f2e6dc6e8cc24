//! Auth CLI commands.

use caseco_auth::AuthSession;
use caseco_core::auth::SignInOutcome;
use clap::{Parser, Subcommand};

use super::OutputFormat;
use crate::admin::Dashboard;
use crate::error::{ClientError, Result};
use crate::output::json;

/// Session management commands.
#[derive(Debug, Parser)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Available auth actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Sign in and save the session.
    Login {
        /// Administrator email.
        #[arg(long, env = "CASECO_USERNAME")]
        username: String,
        /// Password. Prompted for when omitted.
        #[arg(long, env = "CASECO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the saved session.
    Logout,
    /// Show the signed-in administrator.
    Whoami,
}

pub async fn run(
    session: &AuthSession,
    action: AuthAction,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match action {
        AuthAction::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(|e| ClientError::InvalidInput(e.to_string()))?,
            };

            match session.sign_in(&username, &password).await? {
                SignInOutcome::SignedIn => {
                    if !quiet {
                        let user = Dashboard::open(session).await?;
                        println!("Signed in as {}", user.user().display_name());
                    }
                }
                SignInOutcome::ChallengeRequired { challenge, .. } => {
                    return Err(ClientError::InvalidInput(format!(
                        "sign-in requires {challenge}; finish it in the Cognito console first"
                    )));
                }
            }
        }
        AuthAction::Logout => {
            session.sign_out().await?;
            if !quiet {
                println!("Signed out");
            }
        }
        AuthAction::Whoami => {
            let dashboard = Dashboard::open(session).await?;
            let user = dashboard.user();
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    json::format_json_pretty(&serde_json::json!({
                        "username": user.username,
                        "userId": user.user_id,
                        "email": user.attributes.email(),
                    }))
                ),
                OutputFormat::Pretty => {
                    println!("{}\n  User ID: {}", user.display_name(), user.user_id);
                    println!("\nMODULES");
                    for module in dashboard.modules() {
                        println!("  {:<18} {}", module.name, module.description);
                    }
                }
            }
        }
    }
    Ok(())
}
