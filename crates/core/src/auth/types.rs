use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a signed-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub user_id: String,
}

/// Profile attributes of a user (`email`, `name`, `sub`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes(BTreeMap<String, String>);

impl UserAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn sub(&self) -> Option<&str> {
        self.get("sub")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for UserAttributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Signed-in user together with their attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub user_id: String,
    pub attributes: UserAttributes,
}

impl AuthUser {
    pub fn new(user: CurrentUser, attributes: UserAttributes) -> Self {
        Self {
            username: user.username,
            user_id: user.user_id,
            attributes,
        }
    }

    /// Email when known, username otherwise.
    pub fn display_name(&self) -> &str {
        self.attributes.email().unwrap_or(&self.username)
    }
}

/// Tokens issued by the identity provider for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub id_token: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Result of a sign-in attempt that reached the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Credentials accepted and tokens issued.
    SignedIn,
    /// The provider requires another step (e.g. `NEW_PASSWORD_REQUIRED`).
    ChallengeRequired {
        challenge: String,
        session: Option<String>,
    },
}

impl SignInOutcome {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn)
    }
}

/// Local view of the authentication session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Initializing,
    Authenticated(AuthUser),
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
