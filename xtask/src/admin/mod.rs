//! Administrator provisioning commands.

mod cognito;
mod error;
mod password;

pub use error::{AdminError, Result};

use caseco_client::Environment;
use dialoguer::{Confirm, Input, Password};

use crate::prelude::*;
use cognito::NewAdmin;

/// Administrator provisioning commands.
#[derive(Debug, clap::Parser)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub action: AdminAction,
}

/// Available admin actions.
#[derive(Debug, clap::Subcommand)]
pub enum AdminAction {
    /// Create an administrator in the Cognito user pool.
    CreateUser(CreateUserCommand),
}

/// Create an administrator.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create an administrator in the Cognito user pool.

The user is created with a temporary password and no invitation email, its
email is marked verified, and it is added to the Administrators group. The
administrator must choose a new password on first sign-in.

Values not given as flags are prompted for.

Environment variables:
  AWS_ENDPOINT_URL    - Use a local Cognito emulator
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct CreateUserCommand {
    /// Deployment stage the pool belongs to.
    #[arg(long, env = "APP_ENVIRONMENT")]
    pub environment: Option<Environment>,

    /// Cognito user pool id.
    #[arg(long, env = "USER_POOL_ID")]
    pub user_pool_id: Option<String>,

    /// Administrator email, also used as the username.
    #[arg(long)]
    pub email: Option<String>,

    /// Administrator full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for admin command.
pub async fn run(command: AdminCommand, global: crate::Global) -> Result<()> {
    match command.action {
        AdminAction::CreateUser(cmd) => run_create_user(cmd, &global).await,
    }
}

fn prompt_text(prompt: &str, value: Option<String>, field: &'static str) -> Result<String> {
    let value = match value {
        Some(value) => value,
        None => Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AdminError::Prompt(e.to_string()))?,
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AdminError::MissingValue(field));
    }
    Ok(value)
}

fn prompt_password() -> Result<String> {
    let password = Password::new()
        .with_prompt(format!(
            "Temporary Password (min {} chars with uppercase, lowercase, numbers, and symbols)",
            password::MIN_PASSWORD_LENGTH
        ))
        .interact()
        .map_err(|e| AdminError::Prompt(e.to_string()))?;

    let broken = password::broken_rules(&password);
    if broken.is_empty() {
        Ok(password)
    } else {
        Err(AdminError::WeakPassword(broken))
    }
}

async fn run_create_user(cmd: CreateUserCommand, global: &crate::Global) -> Result<()> {
    let environment = match cmd.environment {
        Some(environment) => environment,
        None => prompt_text("Environment (beta/prod)", None, "Environment")?
            .parse::<Environment>()
            .map_err(AdminError::Prompt)?,
    };
    let admin = NewAdmin {
        user_pool_id: prompt_text("User Pool ID", cmd.user_pool_id, "User pool id")?,
        email: prompt_text("Admin Email", cmd.email, "Email")?,
        full_name: prompt_text("Full Name", cmd.name, "Full name")?,
        temporary_password: prompt_password()?,
    };

    let aws_config = cognito::AwsConfig::default();
    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Environment:"), environment);
        aprintln!("{} {}", p_b("User pool:"), admin.user_pool_id);
        aprintln!("{} {} <{}>", p_b("Administrator:"), admin.full_name, admin.email);
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create admin user {} in {}?", admin.email, environment))
            .default(true)
            .interact()
            .map_err(|e| AdminError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(AdminError::UserCancelled);
        }
    }

    let client = cognito::create_client(&aws_config).await;
    let username = cognito::create_user(&client, &admin).await?;
    if global.is_verbose() {
        aprintln!("{} {}", p_g("User created:"), username);
    }
    cognito::add_to_admin_group(&client, &admin).await?;
    if global.is_verbose() {
        aprintln!("{} {}", p_g("Added to group:"), cognito::ADMIN_GROUP);
    }

    if !global.is_silent() {
        aprintln!();
        aprintln!("{}", p_g("========== ADMIN USER CREATED SUCCESSFULLY =========="));
        aprintln!("Email: {}", admin.email);
        aprintln!("Temporary Password: {}", admin.temporary_password);
        aprintln!("Please provide these credentials to the admin user.");
        aprintln!("They will be prompted to change password on first login.");
        aprintln!("{}", p_g("======================================================"));
    }

    Ok(())
}
