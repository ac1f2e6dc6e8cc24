//! Cognito admin API calls (Imperative Shell).

use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, MessageActionType};
use aws_sdk_cognitoidentityprovider::Client;

use super::error::{AdminError, Result};

/// Group every administrator belongs to.
pub const ADMIN_GROUP: &str = "Administrators";

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for a local Cognito emulator).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local Cognito ({})", url),
            None => format!("AWS Cognito (region: {})", self.region),
        }
    }
}

/// An administrator to provision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub user_pool_id: String,
    pub email: String,
    pub full_name: String,
    pub temporary_password: String,
}

impl NewAdmin {
    /// Attributes set on the new user. The email is marked verified.
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("email", self.email.as_str()),
            ("email_verified", "true"),
            ("name", self.full_name.as_str()),
        ]
    }
}

/// Creates a Cognito client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Creates the user without sending an invitation. Returns the username.
pub async fn create_user(client: &Client, admin: &NewAdmin) -> Result<String> {
    let attributes = admin
        .attributes()
        .into_iter()
        .map(|(name, value)| {
            AttributeType::builder()
                .name(name)
                .value(value)
                .build()
                .map_err(|e| AdminError::Cognito(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let response = client
        .admin_create_user()
        .user_pool_id(&admin.user_pool_id)
        .username(&admin.email)
        .temporary_password(&admin.temporary_password)
        .message_action(MessageActionType::Suppress)
        .set_user_attributes(Some(attributes))
        .send()
        .await
        .map_err(|e| AdminError::Cognito(DisplayErrorContext(&e).to_string()))?;

    Ok(response
        .user()
        .and_then(|user| user.username())
        .unwrap_or(&admin.email)
        .to_string())
}

/// Adds the user to [`ADMIN_GROUP`].
pub async fn add_to_admin_group(client: &Client, admin: &NewAdmin) -> Result<()> {
    client
        .admin_add_user_to_group()
        .user_pool_id(&admin.user_pool_id)
        .username(&admin.email)
        .group_name(ADMIN_GROUP)
        .send()
        .await
        .map_err(|e| AdminError::Cognito(DisplayErrorContext(&e).to_string()))?;
    Ok(())
}
